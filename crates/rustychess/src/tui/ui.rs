//! Stateless UI rendering for the chess board.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rustychess::{EngineStatus, SessionView};
use rustychess_core::{PieceKind, Side, Square};

const BOARD_WIDTH: u16 = 30;
const BOARD_HEIGHT: u16 = 11;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    let title = Paragraph::new("RustyChess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH + 4), Constraint::Min(20)])
        .split(chunks[1]);

    draw_board(frame, body[0], app, &view);
    draw_transcript(frame, body[1], app);
    draw_status(frame, chunks[2], app, &view);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, view: &SessionView) {
    let ranks: Vec<u8> = if app.flipped() {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };
    let files: Vec<u8> = if app.flipped() {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut lines: Vec<Line> = ranks
        .iter()
        .map(|&rank| {
            let mut spans = vec![Span::raw(format!("{} ", rank + 1))];
            spans.extend(files.iter().filter_map(|&file| {
                Square::new(file, rank).map(|square| draw_square(app, view, square))
            }));
            Line::from(spans)
        })
        .collect();

    let footer: String = files
        .iter()
        .map(|&file| format!(" {} ", char::from(b'a' + file)))
        .collect();
    lines.push(Line::from(format!("  {}", footer)));

    let board = Paragraph::new(lines).block(
        Block::default()
            .title(format!("Board ({} to move)", view.state().side_to_move()))
            .borders(Borders::ALL),
    );
    frame.render_widget(board, center_rect(area, BOARD_WIDTH + 2, BOARD_HEIGHT));
}

fn draw_square(app: &App, view: &SessionView, square: Square) -> Span<'static> {
    let (symbol, fg) = match view.state().piece_at(square) {
        Some((side, piece)) => (
            piece_symbol(piece),
            match side {
                Side::White => Color::White,
                Side::Black => Color::Black,
            },
        ),
        None => (' ', Color::Reset),
    };

    let bg = if app.selected() == Some(square) {
        Color::Green
    } else if app.cursor() == square {
        Color::Yellow
    } else if square.is_light() {
        Color::Gray
    } else {
        Color::DarkGray
    };

    Span::styled(
        format!(" {} ", symbol),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )
}

/// Uppercase letter for every piece; colour carries the side.
fn piece_symbol(piece: PieceKind) -> char {
    piece.symbol(Side::White)
}

fn draw_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let visible = usize::from(area.height.saturating_sub(2));
    let transcript = app.transcript();
    let start = transcript.len().saturating_sub(visible);

    let lines: Vec<Line> = transcript[start..]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let panel = Paragraph::new(lines).block(Block::default().title("Moves").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, view: &SessionView) {
    let engine = match view.engine() {
        EngineStatus::Ready if *view.in_flight() => "engine: thinking".to_string(),
        other => format!("engine: {}", other),
    };
    let color = if app.has_alert() {
        Color::Red
    } else {
        Color::Yellow
    };

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!("{} | {} | q quit", engine, view.status()))
                .borders(Borders::ALL),
        );
    frame.render_widget(status, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
