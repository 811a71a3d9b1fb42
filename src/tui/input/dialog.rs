use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::pop_grapheme;

pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_add_dialog(),
        (_, KeyCode::Enter) => {
            // Enter is inert until the form is valid
            app.submit_add_dialog();
        }
        (_, KeyCode::Tab) | (_, KeyCode::Down) => app.form.focus_next(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => app.form.focus_prev(),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.form.clear_deadline(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.form.focused_mut().clear(),
        (_, KeyCode::Backspace) => pop_grapheme(app.form.focused_mut()),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.form.focused_mut().push(c)
        }
        _ => {}
    }
}
