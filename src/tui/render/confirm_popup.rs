use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::centered_rect;

/// Ask before deleting the task in `app.confirm_delete`
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.confirm_delete.and_then(|id| app.store.get(id)) else {
        return;
    };

    let popup_area = centered_rect(50, 5, area);
    frame.render_widget(Clear, popup_area);

    let bg = app.theme.background;
    let block = Block::default()
        .title(" Delete task? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let title = truncate_to_width(&task.title, (inner.width as usize).saturating_sub(2));
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" delete   ", desc_style),
            Span::styled("n", key_style),
            Span::styled(" cancel", desc_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
