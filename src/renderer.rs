use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::game::{GameState, GameStatus};
use crate::grid::{Cell, Grid};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_board_full_menu, render_game_over_menu, render_pause_menu};

/// Terminal columns per grid cell; keeps cells roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_SNAKE_HEAD: &str = "██";
const GLYPH_SNAKE_BODY: &str = "▓▓";
const GLYPH_FOOD: &str = "()";

const COLOR_SNAKE_HEAD: Color = Color::LightGreen;
const COLOR_SNAKE_BODY: Color = Color::Green;
const COLOR_FOOD: Color = Color::Red;
const COLOR_BORDER: Color = Color::DarkGray;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, paused: bool) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, paused);
    let play_area = fit_board(play_area, state.grid());

    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if state.status != GameStatus::BoardFull {
        render_food(frame, inner, state);
    }
    render_snake(frame, inner, state);

    match state.status {
        GameStatus::Running if paused => render_pause_menu(frame, play_area),
        GameStatus::Running => {}
        GameStatus::GameOver => {
            render_game_over_menu(frame, play_area, state.score, state.death_reason);
        }
        GameStatus::BoardFull => render_board_full_menu(frame, play_area, state.score),
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = logical_to_terminal(inner, state.grid(), state.food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let grid = state.grid();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins if it overlaps the body on a collision frame.
    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(COLOR_SNAKE_HEAD)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(COLOR_SNAKE_BODY));
        }
    }
}

/// Shrinks `area` to the bordered board size, anchored top-left.
fn fit_board(area: Rect, grid: Grid) -> Rect {
    let width = grid.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.height.saturating_add(2);

    Rect {
        width: width.min(area.width),
        height: height.min(area.height),
        ..area
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
