use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::mode::Mode;
use crate::surface::TextSurface;

const HINTS: &str = "Ctrl+S: Submit | Ctrl+L: Clear | :q Quit";

/// Render the composer. The draft surface is resized to the box it is drawn
/// in, so the engine always sees the real viewport.
pub fn draw(frame: &mut Frame, app: &mut App, draft_height: u16) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                    // transcript
            Constraint::Length(draft_height + 2), // draft box with borders
            Constraint::Length(1),                 // status line
        ])
        .split(area);

    draw_transcript(frame, app, chunks[0]);
    draw_draft(frame, app, chunks[1]);
    draw_status_line(frame, app, chunks[2]);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .transcript
        .iter()
        .flat_map(|message| {
            message.lines().enumerate().map(|(i, text)| {
                let prefix = if i == 0 { "> " } else { "  " };
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                    Span::raw(text.to_string()),
                ])
            })
        })
        .collect();

    // Keep the newest messages in view.
    let skip = lines.len().saturating_sub(area.height as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn draw_draft(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.indicator().to_string());
    let inner = block.inner(area);
    app.draft.resize(inner.width as usize, inner.height as usize);

    let (origin_col, origin_row) = app.draft.origin();
    let lines: Vec<Line> = (origin_row..origin_row + inner.height as usize)
        .map(|row| {
            let text: String = app.draft.line(row).chars().skip(origin_col).collect();
            Line::from(text)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if app.engine.current_mode() != Mode::CommandLine {
        let (col, row) = app.draft.cursor();
        let x = col.saturating_sub(origin_col).min(inner.width.saturating_sub(1) as usize);
        let y = row.saturating_sub(origin_row).min(inner.height.saturating_sub(1) as usize);
        frame.set_cursor_position((inner.x + x as u16, inner.y + y as u16));
    }
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.engine.current_mode() == Mode::CommandLine {
        let text = format!(":{}", app.engine.command_buffer());
        let cursor_x = area.x + text.chars().count().min(area.width as usize) as u16;
        frame.set_cursor_position((cursor_x, area.y));
        Line::from(text)
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(HINTS, Style::default().fg(Color::DarkGray)))
    };

    frame.render_widget(Paragraph::new(line), area);
}
