use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::util::unicode::{display_width, truncate_to_width};

use super::super::app::App;

/// Render the task list: one row per visible task, checkbox first,
/// completed tasks crossed out and dimmed.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let width = area.width as usize;

    let visible_len = app.visible_tasks().len();
    if visible_len == 0 {
        let hint = match app.store.len() {
            0 => "no tasks yet — press a to add one",
            _ => "nothing matches this filter — press f to cycle",
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!("  {}", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    // Keep the cursor row inside the viewport.
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let visible = app.visible_tasks();
    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (row, task) in visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let selected = row == app.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let marker = if selected { "▌" } else { " " };
        let checkbox = if task.completed { "[x]" } else { "[ ]" };

        let mut description_style = Style::default().bg(row_bg);
        if task.completed {
            description_style = description_style
                .fg(app.theme.dim)
                .add_modifier(Modifier::CROSSED_OUT);
        } else if selected {
            description_style = description_style.fg(app.theme.text_bright);
        } else {
            description_style = description_style.fg(app.theme.text);
        }

        let checkbox_style = Style::default()
            .fg(if task.completed {
                app.theme.green
            } else {
                app.theme.dim
            })
            .bg(row_bg);

        // marker + checkbox + two spaces before the description
        let prefix_cells = 1 + 3 + 2;
        let description =
            truncate_to_width(&task.description, width.saturating_sub(prefix_cells + 1));

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(checkbox, checkbox_style),
            Span::styled("  ", Style::default().bg(row_bg)),
            Span::styled(description, description_style),
        ];

        // Pad the selection background to the full row width.
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if used < width {
            spans.push(Span::styled(
                " ".repeat(width - used),
                Style::default().bg(row_bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
