use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::GameState;

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, paused: bool) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(state, paused))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn info_line(state: &GameState, paused: bool) -> Line<'static> {
    let grid = state.grid();
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::raw("Score "),
        Span::styled(state.score.to_string(), value),
        Span::raw("  Length "),
        Span::styled(state.snake.len().to_string(), value),
        Span::raw("  Speed "),
        Span::styled(
            format!("{:.1}/s", state.config().ticks_per_second(state.score)),
            value,
        ),
        Span::raw(format!("  {}x{}", grid.width, grid.height)),
    ];

    if paused {
        spans.push(Span::styled("  PAUSED", Style::default().fg(Color::Yellow)));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::game::GameState;

    use super::info_line;

    #[test]
    fn info_line_shows_score_length_and_size() {
        let state =
            GameState::new_with_seed(GameConfig::with_grid(12, 8), 1).expect("valid config");

        let text: String = info_line(&state, true)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();

        assert_eq!(text, "Score 0  Length 3  Speed 10.0/s  12x8  PAUSED");
    }
}
