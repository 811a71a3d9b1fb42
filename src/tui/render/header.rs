use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::SortType;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Header card: today's date on the left, completed/total on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.card_bg;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let left = format!(" Today, {}", app.today.format("%-d %b %Y"));
    let right = format!(
        "{}/{} ",
        app.store.completed_count(),
        app.store.total_count()
    );
    let width = inner.width as usize;
    let pad = width.saturating_sub(display_width(&left) + display_width(&right));

    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(right, Style::default().fg(app.theme.text).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Right-aligned sort controls: the deadline toggle, plus clear while sorted
pub fn render_sort_controls(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = Vec::new();

    match app.store.sort_type() {
        SortType::Deadline => {
            let arrow = if app.store.sort_ascending() {
                "\u{2191}"
            } else {
                "\u{2193}"
            };
            spans.push(Span::styled(
                format!(" Deadline {} ", arrow),
                Style::default()
                    .fg(app.theme.background)
                    .bg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("  ", Style::default().bg(bg)));
            spans.push(Span::styled(
                "\u{2715} Clear ",
                Style::default().fg(app.theme.red).bg(bg),
            ));
        }
        SortType::None => {
            spans.push(Span::styled(
                " Deadline ",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_shows_date_and_progress() {
        let app = app_with_tasks(&[("A", None, true), ("B", None, false), ("C", None, false)]);
        let output = render_to_string(40, 3, |frame, area| {
            render_header(frame, &app, area);
        });
        let middle = output.lines().nth(1).unwrap();
        assert!(middle.contains("Today, 14 May 2025"));
        assert!(middle.contains("1/3"));
    }

    #[test]
    fn sort_controls_unsorted() {
        let app = app_with_tasks(&[]);
        let output = render_to_string(30, 1, |frame, area| {
            render_sort_controls(frame, &app, area);
        });
        assert_eq!(output, format!("{}Deadline", " ".repeat(21)));
    }

    #[test]
    fn sort_controls_show_direction_and_clear() {
        let mut app = app_with_tasks(&[]);
        app.store.toggle_deadline_sort();
        let output = render_to_string(40, 1, |frame, area| {
            render_sort_controls(frame, &app, area);
        });
        assert!(output.contains("Deadline \u{2191}"));
        assert!(output.contains("Clear"));

        app.store.toggle_deadline_sort();
        let output = render_to_string(40, 1, |frame, area| {
            render_sort_controls(frame, &app, area);
        });
        assert!(output.contains("Deadline \u{2193}"));
    }
}
