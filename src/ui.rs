//! Terminal UI rendering with ratatui

use crate::game::{Game, GameState};
use crate::grid::{Cell, GRID_COLS, GRID_ROWS};
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Board (10*2 + 2 for borders) + stats
const GAME_WIDTH: u16 = 40;
/// Board (20 + 2 for borders)
const GAME_HEIGHT: u16 = GRID_ROWS as u16 + 2;
/// Background for empty cells
const EMPTY_COLOR: Color = Color::Rgb(17, 17, 17);

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // board | stats
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GRID_COLS as u16 * 2 + 2),
            Constraint::Min(14),
        ])
        .split(game_area);

    render_board(frame, layout[0], game, settings);
    render_stats(frame, layout[1], game);

    match game.state() {
        GameState::Idle => render_overlay(frame, area, "BLOCKFALL", "Press Enter to start"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Enter to play again"),
        GameState::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Settled grid with the active piece drawn on top
fn board_cells(game: &Game) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = game.grid().iter_rows().map(|row| row.to_vec()).collect();
    if let Some(piece) = game.current_piece() {
        let cell = Cell::Filled(piece.piece_type);
        for (row, col) in piece.cells() {
            // Parts above the top are not drawn
            if row < 0 || col < 0 {
                continue;
            }
            if let Some(slot) = rows.get_mut(row as usize).and_then(|r| r.get_mut(col as usize)) {
                *slot = cell;
            }
        }
    }
    rows
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = board_cells(game)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    Cell::Filled(kind) => Span::styled(block_char, Style::default().fg(kind.color())),
                    Cell::Empty => Span::styled(empty_char, Style::default().fg(Color::DarkGray).bg(EMPTY_COLOR)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let stat = |label: &'static str, value: String, color: Color| {
        [
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::raw(""),
        ]
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.extend(stat("SCORE", score.points.to_string(), Color::Yellow));
    lines.extend(stat("LINES", score.lines.to_string(), Color::Green));
    lines.extend(stat("LEVEL", score.level.to_string(), Color::Cyan));

    // Last clear
    if let Some(report) = game.last_lock().filter(|r| r.rows_cleared > 0) {
        lines.push(Line::styled(
            format!("+{} ({} rows)", report.points, report.rows_cleared),
            Style::default().fg(Color::Magenta),
        ));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for idle/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 24, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(game: &Game) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        terminal
            .draw(|frame| render_game(frame, game, &Settings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_idle_overlay() {
        let game = Game::with_seed(1);
        assert!(draw(&game).contains("Press Enter to start"));
    }

    #[test]
    fn test_running_shows_stats() {
        let mut game = Game::with_seed(1);
        game.start();
        let screen = draw(&game);
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("LEVEL"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_active_piece_is_drawn() {
        let mut game = Game::with_seed(1);
        game.start();
        let cells = board_cells(&game);
        let filled = cells.iter().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 4);
        assert!(game.grid().is_empty());
    }
}
