use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;

/// Draws the start prompt as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[Space]/[Enter] Start"),
        Line::from("[Q] Quit"),
        Line::from("Arrows/WASD to steer").style(Style::default().fg(theme.menu_footer)),
    ];

    render_popup(frame, area, " start ", lines);
}

/// Draws the pause prompt as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from("PAUSED").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[R] Restart  [H] Home"),
        Line::from("[Q] Quit").style(Style::default().fg(theme.menu_footer)),
    ];

    render_popup(frame, area, " pause ", lines);
}

/// Draws the game-over panel with the final score.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, final_score: u32, theme: &Theme) {
    let lines = vec![
        Line::from("GAME OVER").style(Style::default().fg(theme.food).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Score: {final_score}")),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[H] Home  [Q] Quit").style(Style::default().fg(theme.menu_footer)),
    ];

    render_popup(frame, area, " game over ", lines);
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let width = lines
        .iter()
        .map(Line::width)
        .max()
        .and_then(|width| u16::try_from(width).ok())
        .unwrap_or(0)
        .saturating_add(4);

    let popup = centered_popup(area, width, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title.to_owned())),
        popup,
    );
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_popup;

    #[test]
    fn popup_is_centered_inside_the_area() {
        let popup = centered_popup(Rect::new(10, 5, 40, 20), 20, 6);

        assert_eq!(popup, Rect::new(20, 12, 20, 6));
    }

    #[test]
    fn popup_shrinks_to_a_small_area() {
        let area = Rect::new(0, 0, 12, 4);
        let popup = centered_popup(area, 30, 10);

        assert_eq!(popup, area);
    }
}
