use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts all input
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input(_) => handle_input(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.visible_tasks().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            let len = app.visible_tasks().len();
            app.cursor = len.saturating_sub(1);
        }

        // Task intents
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('a') => app.begin_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('f') => app.cycle_filter(),

        // Reorder within the visible list
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Char('K') => app.move_selected_up(),

        _ => {}
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),

        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_buffer.len(),

        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.drain(prev..app.input_cursor);
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.drain(app.input_cursor..next);
            }
        }

        KeyCode::Char(c) => {
            // Plain typing only; leave ctrl-chords alone.
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }

        _ => {}
    }
}
