use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let hint = if !app.show_key_hints {
        ""
    } else if app.show_help {
        "? close help"
    } else {
        match app.mode() {
            Mode::Navigate => {
                "a add  space done  d delete  s sort  c clear  Tab completed  ? help  q quit"
            }
            Mode::AddTask => "Tab next field  Enter add  Esc cancel",
            Mode::Confirm => "y delete  n cancel",
        }
    };

    let line = Line::from(Span::styled(
        format!(" {}", hint),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
