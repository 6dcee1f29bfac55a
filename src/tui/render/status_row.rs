use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::app::{App, InputKind, Mode, NoticeLevel};

/// Render the status row (bottom of screen): input prompt while typing,
/// otherwise the total count, any active notice, and key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Input(kind) => {
            let prompt = match kind {
                InputKind::Add => "add",
                InputKind::Edit(_) => "edit",
            };
            let (before, after) = app.input_buffer.split_at(app.input_cursor);
            let mut spans = vec![
                Span::styled(
                    format!("{} ▸ ", prompt),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ),
                Span::styled(
                    before.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    after.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            let hint = "Enter save  Esc cancel";
            pad_with_hint(&mut spans, hint, width, app, bg);
            Line::from(spans)
        }
        Mode::Navigate => {
            // Total is the unfiltered collection size.
            let count = format!(" {} task(s)", app.store.len());
            let mut spans = vec![Span::styled(
                count,
                Style::default().fg(app.theme.dim).bg(bg),
            )];

            if let Some(notice) = &app.notice {
                let color = match notice.level {
                    NoticeLevel::Info => app.theme.green,
                    NoticeLevel::Error => app.theme.red,
                };
                spans.push(Span::styled(
                    format!("  {}", notice.text),
                    Style::default().fg(color).bg(bg),
                ));
                pad_with_hint(&mut spans, "", width, app, bg);
            } else {
                let hint = if app.show_key_hints {
                    "a add  e edit  ⎵ toggle  d delete  J/K move  f filter  ? help  q quit"
                } else {
                    ""
                };
                pad_with_hint(&mut spans, hint, width, app, bg);
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align `hint` after the existing spans, padding with background.
fn pad_with_hint(spans: &mut Vec<Span<'_>>, hint: &str, width: usize, app: &App, bg: ratatui::style::Color) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    }
    if !hint.is_empty() {
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
}
