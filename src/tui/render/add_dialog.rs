use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};
use crate::util::unicode::truncate_to_width;

use super::centered_rect;

const LABEL_WIDTH: usize = 10;

/// Render the add-task dialog (title, optional date and time)
pub fn render_add_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog_area = centered_rect(60, 10, area);
    frame.render_widget(Clear, dialog_area);

    let bg = app.theme.background;
    let block = Block::default()
        .title(" New task ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let form = &app.form;
    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 2);
    let time_enabled = !form.date.trim().is_empty();

    let mut lines = vec![
        field_line(app, "Title", &form.title, "", FormField::Title, true, value_width),
        Line::from(""),
        Line::from(Span::styled(
            " Deadline (optional)",
            Style::default().fg(app.theme.text).bg(bg),
        )),
        field_line(app, "Date", &form.date, "YYYY-MM-DD", FormField::Date, true, value_width),
        field_line(app, "Time", &form.time, "HH:MM", FormField::Time, time_enabled, value_width),
    ];

    if form.deadline_input().is_invalid() {
        lines.push(Line::from(Span::styled(
            " Invalid date or time",
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        lines.push(Line::from(""));
    }

    let submit_style = if form.can_submit() {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let hint_style = Style::default().fg(app.theme.dim).bg(bg);
    let mut footer = vec![
        Span::styled(" Enter add", submit_style),
        Span::styled("   Esc cancel", hint_style),
    ];
    if form.has_deadline() {
        footer.push(Span::styled("   Ctrl-D clear deadline", hint_style));
    }
    lines.push(Line::from(footer));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn field_line<'a>(
    app: &App,
    label: &str,
    value: &str,
    placeholder: &str,
    field: FormField,
    enabled: bool,
    value_width: usize,
) -> Line<'a> {
    let bg = app.theme.background;
    let focused = app.form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if enabled {
        Style::default().fg(app.theme.text).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    let mut spans = vec![Span::styled(
        format!(" {:<width$}", label, width = LABEL_WIDTH - 1),
        label_style,
    )];
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        // Show the tail of long input so the cursor stays in view
        let shown = if value.chars().count() > value_width {
            let skip = value.chars().count() - value_width;
            value.chars().skip(skip).collect::<String>()
        } else {
            value.to_string()
        };
        spans.push(Span::styled(
            truncate_to_width(&shown, value_width),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    Line::from(spans)
}
