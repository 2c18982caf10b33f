use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{ColorToken, SpeedMode, WorldSnapshot};

use super::overlay::{render_overlay, OverlayMessage};

// Each grid cell is two terminal columns wide so cells look square
const CELL_COLUMNS: u16 = 2;
const SCOREBOARD_WIDTH: u16 = 28;
const PLAYER_GLYPH: &str = "● ";
const TREAT_GLYPH: &str = "◆ ";
const EMPTY_GLYPH: &str = "· ";

/// Colours and status shown around the board
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub grid: ColorToken,
    pub treat: ColorToken,
    pub paused: bool,
    pub speed: SpeedMode,
}

pub fn render(
    frame: &mut Frame,
    snapshot: &WorldSnapshot,
    hud: &Hud,
    overlay: Option<&OverlayMessage>,
) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Min(3),    // Board and scoreboard
            Constraint::Length(1), // Controls hint
        ])
        .split(area);

    draw_status(frame, snapshot, hud, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_columns(snapshot.width)),
            Constraint::Length(SCOREBOARD_WIDTH),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    draw_board(frame, snapshot, hud, columns[0]);
    draw_scoreboard(frame, snapshot, columns[1]);
    draw_controls(frame, rows[2]);

    if let Some(message) = overlay {
        render_overlay(frame, message, area);
    }
}

/// Terminal columns the board wants, borders included, capped at `u16::MAX`
fn board_columns(width: u32) -> u16 {
    let width = width.min(u16::MAX as u32) as u16;
    width.saturating_mul(CELL_COLUMNS).saturating_add(2)
}

fn to_color(token: ColorToken) -> Color {
    let (r, g, b) = token.rgb();
    Color::Rgb(r, g, b)
}

fn draw_status(frame: &mut Frame, snapshot: &WorldSnapshot, hud: &Hud, area: Rect) {
    let speed = match hud.speed {
        SpeedMode::Fast => "fast",
        SpeedMode::Slow => "slow",
    };
    let state = if hud.paused { "PAUSED" } else { "running" };

    let status = Paragraph::new(format!(
        "Round {}  |  {}  |  speed: {}",
        snapshot.tick, state, speed
    ))
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Left);

    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, snapshot: &WorldSnapshot, hud: &Hud, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(to_color(hud.grid)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Cells beyond the frame are clipped
    let visible_rows = snapshot.height.min(inner.height as u32) as i32;
    let visible_cols = snapshot.width.min((inner.width / CELL_COLUMNS) as u32) as i32;
    let mut lines = Vec::with_capacity(visible_rows as usize);

    for y in 0..visible_rows {
        let mut spans = Vec::with_capacity(visible_cols as usize);
        for x in 0..visible_cols {
            // Later players draw over earlier ones, players over treats
            let player = snapshot
                .players
                .iter()
                .rev()
                .find(|p| p.active && p.position.x == x && p.position.y == y);

            let span = if let Some(player) = player {
                Span::styled(PLAYER_GLYPH, Style::default().fg(to_color(player.color)))
            } else if snapshot.treats.iter().any(|t| t.x == x && t.y == y) {
                Span::styled(TREAT_GLYPH, Style::default().fg(to_color(hud.treat)))
            } else {
                Span::styled(EMPTY_GLYPH, Style::default().fg(Color::DarkGray))
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_scoreboard(frame: &mut Frame, snapshot: &WorldSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Scores ")
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<Line> = snapshot
        .players
        .iter()
        .map(|player| {
            let marker = if player.active { "●" } else { "○" };
            Line::from(vec![
                Span::styled(
                    format!("{} ", marker),
                    Style::default().fg(to_color(player.color)),
                ),
                Span::styled(
                    format!("{:<8} {:>4}", player.kind.display_name(), player.score),
                    Style::default().fg(Color::White),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "Arrows: steer  P: pause  F: speed  A/G: toggle bots  R: reset  X: sit out  Q: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerId, PlayerView, Position};
    use crate::players::PlayerKind;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const COLS: u16 = 80;
    const ROWS: u16 = 24;

    fn snapshot(width: u32, height: u32) -> WorldSnapshot {
        WorldSnapshot {
            width,
            height,
            tick: 3,
            players: vec![PlayerView {
                id: PlayerId(0),
                kind: PlayerKind::GreedyBot,
                position: Position::ORIGIN,
                color: ColorToken::GREEDY,
                active: true,
                score: 2,
            }],
            treats: vec![Position::new(1, 0)],
        }
    }

    fn draw(snapshot: &WorldSnapshot) -> Buffer {
        let hud = Hud {
            grid: ColorToken([0x44, 0x44, 0x44]),
            treat: ColorToken::TREAT,
            paused: false,
            speed: SpeedMode::Fast,
        };
        let mut terminal = Terminal::new(TestBackend::new(COLS, ROWS)).unwrap();
        terminal
            .draw(|f| render(f, snapshot, &hud, None))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn symbol_at(buffer: &Buffer, x: u16, y: u16) -> &str {
        buffer.content[(y * COLS + x) as usize].symbol()
    }

    #[test]
    fn test_board_columns_saturate() {
        assert_eq!(board_columns(10), 22);
        assert_eq!(board_columns(40_000), u16::MAX);
        assert_eq!(board_columns(u32::MAX), u16::MAX);
    }

    #[test]
    fn test_player_and_treat_in_first_cells() {
        let buffer = draw(&snapshot(10, 10));

        // Status line, then the board border; first cell at (1, 2)
        assert_eq!(symbol_at(&buffer, 1, 2), "●");
        assert_eq!(symbol_at(&buffer, 3, 2), "◆");
        assert_eq!(symbol_at(&buffer, 5, 2), "·");
    }

    #[test]
    fn test_huge_board_is_clipped() {
        let buffer = draw(&snapshot(40_000, 70_000));

        let status: String = (0..7).map(|x| symbol_at(&buffer, x, 0)).collect();
        assert_eq!(status, "Round 3");
    }
}
