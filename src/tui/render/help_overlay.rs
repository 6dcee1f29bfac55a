use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::super::app::App;

const KEYS: &[(&str, &str)] = &[
    ("j / ↓", "move down"),
    ("k / ↑", "move up"),
    ("g / G", "jump to top / bottom"),
    ("space / x", "toggle completed"),
    ("a", "add task"),
    ("e / Enter", "edit task"),
    ("d", "delete task"),
    ("J / K", "move task down / up"),
    ("f", "cycle filter"),
    ("?", "this help"),
    ("q", "quit"),
];

/// Render the help overlay centered on top of the screen.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let height = (KEYS.len() + 4) as u16;
    let width = 44u16.min(area.width);
    let popup = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    };

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " keys ",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim))
        .style(Style::default().bg(app.theme.background));

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default().fg(app.theme.text_bright),
            ),
            Span::styled(*action, Style::default().fg(app.theme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  any key to close",
        Style::default().fg(app.theme.dim),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}
