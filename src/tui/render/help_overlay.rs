use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const NAVIGATE_BINDINGS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "Move cursor up/down"),
    ("g/G", "First / last task"),
    ("Space/x", "Toggle done"),
    ("d", "Delete task"),
    ("a", "Add task"),
    ("s", "Sort by deadline / reverse"),
    ("c", "Clear sort"),
    ("Tab", "Show/hide completed"),
    ("q/Esc", "Quit"),
];

const DIALOG_BINDINGS: &[(&str, &str)] = &[
    ("Tab", "Next field"),
    ("Enter", "Add task"),
    ("Ctrl-D", "Clear deadline"),
    ("Esc", "Cancel"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    for (key, desc) in NAVIGATE_BINDINGS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" New task dialog", header_style)));
    for (key, desc) in DIALOG_BINDINGS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }

    let block = Block::default()
        .title(" Key Bindings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!(" {:<10}", key), key_style),
        Span::styled(desc, desc_style),
    ]));
}
