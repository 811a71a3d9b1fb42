use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,

        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => app.cursor = 0,
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => {
            app.cursor = app.visible_tasks().len().saturating_sub(1)
        }

        // Task actions
        (_, KeyCode::Char(' ')) | (KeyModifiers::NONE, KeyCode::Char('x')) | (_, KeyCode::Enter) => {
            app.toggle_selected()
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.request_delete(),
        (KeyModifiers::NONE, KeyCode::Char('a')) | (KeyModifiers::NONE, KeyCode::Char('n')) => {
            app.open_add_dialog()
        }

        // Sorting
        (KeyModifiers::NONE, KeyCode::Char('s')) => {
            app.store.toggle_deadline_sort();
            app.clamp_cursor();
        }
        (KeyModifiers::NONE, KeyCode::Char('c')) => {
            app.store.clear_sort();
            app.clamp_cursor();
        }

        (_, KeyCode::Tab) => app.toggle_completed_section(),
        _ => {}
    }
}
