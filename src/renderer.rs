use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget, Wrap};
use ratatui::Frame;

use crate::config::{GridSize, Theme, GLYPH_HALF_UPPER};
use crate::game::{GameState, RunState};
use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::surface::{PixelBuffer, Surface};
use crate::ui::chrome::Chrome;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Read-only view of everything needed to draw one board frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Segments from head (index 0) to tail.
    pub snake: &'a Snake,
    pub food: Position,
    /// Heading the head faces, used for eye placement.
    pub direction: Direction,
    pub grid: GridSize,
    pub cell_size: u16,
    pub score: u32,
    pub run_state: RunState,
}

impl<'a> Snapshot<'a> {
    #[must_use]
    pub fn of(state: &'a GameState, cell_size: u16) -> Self {
        Self {
            snake: &state.snake,
            food: state.food.position,
            direction: state.snake.direction(),
            grid: state.bounds(),
            cell_size,
            score: state.score,
            run_state: state.run_state,
        }
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Pixel dimensions of a surface that holds the whole grid.
    #[must_use]
    pub fn surface_size(&self) -> (u16, u16) {
        (
            self.grid.width.saturating_mul(self.cell_size),
            self.grid.height.saturating_mul(self.cell_size),
        )
    }
}

/// Consumer of board snapshots. Invoked after every reset and every tick.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Draws the board onto any [`Surface`].
pub fn draw_board<S: Surface + ?Sized>(surface: &mut S, snapshot: &Snapshot<'_>, theme: &Theme) {
    let (width, height) = surface.size();
    let (width, height) = (i32::from(width), i32::from(height));
    let cell = i32::from(snapshot.cell_size);

    surface.clear_rect(0, 0, width, height);
    surface.fill_rect(0, 0, width, height, theme.background);

    let food_inset = cell / 10;
    let (fx, fy) = cell_origin(snapshot.food, cell);
    surface.fill_rect(
        fx + food_inset,
        fy + food_inset,
        cell - 2 * food_inset,
        cell - 2 * food_inset,
        theme.food,
    );

    for (index, segment) in snapshot.snake.segments().enumerate() {
        let (x, y) = cell_origin(*segment, cell);

        if index == 0 {
            let inset = cell / 20;
            surface.fill_rect(
                x + inset,
                y + inset,
                cell - 2 * inset,
                cell - 2 * inset,
                theme.snake_head,
            );

            let eye = eye_size(cell);
            let (eye_x, eye_y) = eye_offset(cell, snapshot.direction);
            surface.fill_rect(x + eye_x, y + eye_y, eye, eye, theme.snake_eye);
        } else {
            let inset = cell / 10;
            surface.fill_rect(
                x + inset,
                y + inset,
                cell - 2 * inset,
                cell - 2 * inset,
                theme.snake_body,
            );
        }
    }

    surface.stroke_rect(0, 0, width, height, theme.border);
}

fn cell_origin(position: Position, cell: i32) -> (i32, i32) {
    (position.x * cell, position.y * cell)
}

fn eye_size(cell: i32) -> i32 {
    (cell * 3 / 20).max(1)
}

/// Eye offset inside the head cell: pushed toward the heading, centred across it.
fn eye_offset(cell: i32, direction: Direction) -> (i32, i32) {
    let eye = eye_size(cell);
    let margin = cell * 3 / 20;
    let along = |component: i32| match component {
        1 => cell - margin - eye,
        -1 => margin,
        _ => (cell - eye) / 2,
    };

    let (dx, dy) = direction.delta();
    (along(dx), along(dy))
}

/// Renderer that keeps the latest board in a [`PixelBuffer`] for the terminal host.
#[derive(Debug, Clone)]
pub struct BoardRenderer {
    theme: Theme,
    pixels: PixelBuffer,
    frames: u64,
}

impl BoardRenderer {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            pixels: PixelBuffer::new(0, 0),
            frames: 0,
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Number of snapshots drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Renderer for BoardRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        let (width, height) = snapshot.surface_size();
        if self.pixels.size() != (width, height) {
            self.pixels = PixelBuffer::new(width, height);
        }

        draw_board(&mut self.pixels, snapshot, &self.theme);
        self.frames += 1;
    }
}

/// Shows a pixel surface in the terminal, two pixel rows per character row.
#[derive(Debug, Clone, Copy)]
pub struct HalfBlockView<'a> {
    pixels: &'a PixelBuffer,
}

impl<'a> HalfBlockView<'a> {
    #[must_use]
    pub fn new(pixels: &'a PixelBuffer) -> Self {
        Self { pixels }
    }

    /// Terminal cells needed to show the whole surface.
    #[must_use]
    pub fn cell_size(&self) -> (u16, u16) {
        (self.pixels.width(), self.pixels.height().div_ceil(2))
    }
}

impl Widget for HalfBlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = self.cell_size();

        for row in 0..rows.min(area.height) {
            for column in 0..columns.min(area.width) {
                let upper = self.pixels.pixel(column, row * 2).unwrap_or(Color::Reset);
                let lower = self
                    .pixels
                    .pixel(column, row * 2 + 1)
                    .unwrap_or(Color::Reset);

                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol(GLYPH_HALF_UPPER).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

/// Renders the full terminal frame: status line, board, and any overlay.
pub fn render(
    frame: &mut Frame<'_>,
    board: &PixelBuffer,
    state: &GameState,
    chrome: &Chrome,
    theme: &Theme,
) {
    let [hud_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(frame, hud_area, state, chrome, theme);

    let view = HalfBlockView::new(board);
    let (columns, rows) = view.cell_size();
    if columns > board_area.width || rows > board_area.height {
        render_too_small(frame, board_area, columns, rows);
        return;
    }

    let [board_row] = Layout::vertical([Constraint::Length(rows)])
        .flex(Flex::Center)
        .areas(board_area);
    let [play_area] = Layout::horizontal([Constraint::Length(columns)])
        .flex(Flex::Center)
        .areas(board_row);

    frame.render_widget(view, play_area);

    if let Some(final_score) = chrome.game_over_panel() {
        render_game_over_menu(frame, play_area, final_score, theme);
    } else if state.is_fresh() {
        render_start_menu(frame, play_area, theme);
    } else if state.run_state == RunState::Idle {
        render_pause_menu(frame, play_area, theme);
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, columns: u16, rows: u16) {
    let message = Paragraph::new(vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {columns}x{rows}, have {}x{}", area.width, area.height)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::Yellow));

    frame.render_widget(message, area);
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use ratatui::widgets::Widget;

    use crate::config::{GridSize, THEME_DEFAULT};
    use crate::game::RunState;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};
    use crate::surface::{PixelBuffer, Surface};

    use super::{draw_board, eye_offset, BoardRenderer, HalfBlockView, Renderer, Snapshot};

    fn snapshot(snake: &Snake, food: Position, cell_size: u16) -> Snapshot<'_> {
        Snapshot {
            snake,
            food,
            direction: snake.direction(),
            grid: GridSize::square(5),
            cell_size,
            score: 0,
            run_state: RunState::Idle,
        }
    }

    #[test]
    fn eye_sits_toward_the_heading() {
        assert_eq!(eye_offset(20, Direction::Right), (14, 8));
        assert_eq!(eye_offset(20, Direction::Left), (3, 8));
        assert_eq!(eye_offset(20, Direction::Up), (8, 3));
        assert_eq!(eye_offset(20, Direction::Down), (8, 14));
    }

    #[test]
    fn board_shows_food_head_and_body_colors() {
        let snake = Snake::new(Position::new(2, 2), 3, Direction::Right);
        let view = snapshot(&snake, Position::new(4, 0), 10);
        let mut surface = PixelBuffer::new(50, 50);
        let theme = THEME_DEFAULT;

        draw_board(&mut surface, &view, &theme);

        // Food cell (4, 0): inset by one pixel on a ten-pixel cell.
        assert_eq!(surface.pixel(45, 5), Some(theme.food));
        assert_eq!(surface.pixel(40, 5), Some(theme.background));
        // Head cell (2, 2) and its eye toward the right.
        assert_eq!(surface.pixel(21, 21), Some(theme.snake_head));
        assert_eq!(surface.pixel(20 + 8, 20 + 4), Some(theme.snake_eye));
        // Body cells (1, 2) and (0, 2).
        assert_eq!(surface.pixel(15, 25), Some(theme.snake_body));
        assert_eq!(surface.pixel(5, 25), Some(theme.snake_body));
        // Empty cell and the outer frame.
        assert_eq!(surface.pixel(25, 45), Some(theme.background));
        assert_eq!(surface.pixel(0, 0), Some(theme.border));
    }

    #[test]
    fn board_renderer_sizes_its_surface_to_the_grid() {
        let snake = Snake::new(Position::new(2, 2), 3, Direction::Right);
        let mut renderer = BoardRenderer::new(THEME_DEFAULT);

        renderer.render(&snapshot(&snake, Position::new(0, 0), 2));

        assert_eq!(renderer.pixels().size(), (10, 10));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn half_block_view_packs_two_pixel_rows_per_cell() {
        let mut pixels = PixelBuffer::new(2, 3);
        pixels.fill_rect(0, 0, 2, 1, Color::Red);
        pixels.fill_rect(0, 1, 2, 1, Color::Blue);
        pixels.fill_rect(0, 2, 1, 1, Color::Green);

        let area = Rect::new(0, 0, 4, 4);
        let mut buffer = Buffer::empty(area);
        HalfBlockView::new(&pixels).render(area, &mut buffer);

        let top = &buffer[(0, 0)];
        assert_eq!(top.symbol(), "▀");
        assert_eq!(top.fg, Color::Red);
        assert_eq!(top.bg, Color::Blue);

        let bottom = &buffer[(0, 1)];
        assert_eq!(bottom.fg, Color::Green);
        assert_eq!(bottom.bg, Color::Reset);

        assert_eq!(buffer[(2, 0)].symbol(), " ");
    }
}
