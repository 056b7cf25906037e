use ratatui::style::Color;

/// Minimal 2D drawing capability the board routine needs.
///
/// Coordinates are in surface pixels. Rectangles may extend past the edges;
/// implementations clip them.
pub trait Surface {
    /// Returns `(width, height)` in pixels.
    fn size(&self) -> (u16, u16);

    /// Resets a rectangle to the transparent color.
    fn clear_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);

    /// Draws a one-pixel outline along the inside of the rectangle.
    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);
}

/// Headless pixel surface backed by a flat color vector.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Creates a cleared surface.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::Reset; usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns the pixel color, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels.get(self.index(x, y)).copied()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Clips a rectangle to the surface and returns its pixel spans.
    fn clip(&self, x: i32, y: i32, width: i32, height: i32) -> Option<(u16, u16, u16, u16)> {
        let left = x.max(0);
        let top = y.max(0);
        let right = x.saturating_add(width).min(i32::from(self.width));
        let bottom = y.saturating_add(height).min(i32::from(self.height));

        if left >= right || top >= bottom {
            return None;
        }

        Some((
            u16::try_from(left).ok()?,
            u16::try_from(top).ok()?,
            u16::try_from(right).ok()?,
            u16::try_from(bottom).ok()?,
        ))
    }

    fn paint(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let Some((left, top, right, bottom)) = self.clip(x, y, width, height) else {
            return;
        };

        for row in top..bottom {
            let start = self.index(left, row);
            let end = self.index(right, row);
            self.pixels[start..end].fill(color);
        }
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.paint(x, y, width, height, Color::Reset);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.paint(x, y, width, height, color);
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }

        self.paint(x, y, width, 1, color);
        self.paint(x, y + height - 1, width, 1, color);
        self.paint(x, y, 1, height, color);
        self.paint(x + width - 1, y, 1, height, color);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{PixelBuffer, Surface};

    #[test]
    fn fill_rect_is_clipped_to_the_surface() {
        let mut surface = PixelBuffer::new(4, 3);

        surface.fill_rect(-2, 1, 4, 10, Color::Red);

        assert_eq!(surface.pixel(0, 0), Some(Color::Reset));
        assert_eq!(surface.pixel(0, 1), Some(Color::Red));
        assert_eq!(surface.pixel(1, 2), Some(Color::Red));
        assert_eq!(surface.pixel(2, 1), Some(Color::Reset));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn stroke_rect_leaves_the_interior_untouched() {
        let mut surface = PixelBuffer::new(5, 5);

        surface.stroke_rect(0, 0, 5, 5, Color::White);

        assert_eq!(surface.pixel(0, 0), Some(Color::White));
        assert_eq!(surface.pixel(4, 2), Some(Color::White));
        assert_eq!(surface.pixel(2, 4), Some(Color::White));
        assert_eq!(surface.pixel(2, 2), Some(Color::Reset));
    }

    #[test]
    fn clear_rect_resets_pixels() {
        let mut surface = PixelBuffer::new(2, 2);
        surface.fill_rect(0, 0, 2, 2, Color::Green);

        surface.clear_rect(0, 0, 1, 2);

        assert_eq!(surface.pixel(0, 1), Some(Color::Reset));
        assert_eq!(surface.pixel(1, 1), Some(Color::Green));
    }

    #[test]
    fn empty_rectangles_draw_nothing() {
        let mut surface = PixelBuffer::new(3, 3);

        surface.fill_rect(1, 1, 0, 2, Color::Blue);
        surface.stroke_rect(1, 1, -1, 2, Color::Blue);

        assert!((0..3).all(|y| (0..3).all(|x| surface.pixel(x, y) == Some(Color::Reset))));
    }
}
