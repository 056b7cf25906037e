use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::{GameState, RunState};
use crate::ui::chrome::Chrome;

const TITLE: &str = "SNAKE";
const SEPARATOR: &str = " │ ";

/// Values shown on the status line, in display order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct StatusValues {
    score: u32,
    length: usize,
    width: u16,
    height: u16,
    run_state: RunState,
}

/// Renders the one-line status bar: title on the left, values on the right.
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    chrome: &Chrome,
    theme: &Theme,
) {
    let [title_area, info_area] =
        Layout::horizontal([Constraint::Length(TITLE.width() as u16 + 1), Constraint::Min(0)])
            .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(TITLE)).style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        title_area,
    );

    let values = StatusValues {
        score: chrome.score(),
        length: state.snake.len(),
        width: state.bounds().width,
        height: state.bounds().height,
        run_state: state.run_state,
    };
    frame.render_widget(
        Paragraph::new(status_line(values, usize::from(info_area.width), theme))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        info_area,
    );
}

fn status_line(values: StatusValues, available_width: usize, theme: &Theme) -> Line<'static> {
    let compact = status_width(values, false) > available_width;
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    Line::from(vec![
        Span::raw(format!("{score_label}: ")),
        Span::styled(
            values.score.to_string(),
            Style::default().fg(theme.hud_score),
        ),
        Span::raw(SEPARATOR),
        Span::raw(format!("{length_label}: ")),
        Span::styled(values.length.to_string(), Style::default().fg(theme.hud_score)),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}x{}", values.width, values.height)),
        Span::raw(SEPARATOR),
        Span::styled(
            run_state_label(values.run_state),
            Style::default().fg(run_state_color(values.run_state)),
        ),
    ])
}

fn status_width(values: StatusValues, compact: bool) -> usize {
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };
    let text = format!(
        "{score_label}: {}{SEPARATOR}{length_label}: {}{SEPARATOR}{}x{}{SEPARATOR}{}",
        values.score,
        values.length,
        values.width,
        values.height,
        run_state_label(values.run_state),
    );

    text.width()
}

fn run_state_label(run_state: RunState) -> &'static str {
    match run_state {
        RunState::Idle => "Idle",
        RunState::Running => "Running",
        RunState::GameOver => "Game over",
    }
}

fn run_state_color(run_state: RunState) -> Color {
    match run_state {
        RunState::Idle => Color::Yellow,
        RunState::Running => Color::Green,
        RunState::GameOver => Color::Red,
    }
}
