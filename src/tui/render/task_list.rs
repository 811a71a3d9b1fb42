use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops::deadline::format_deadline_display;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the pending section and the collapsible completed section.
/// Adjusts `app.scroll_offset` so the cursor row stays visible.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let empty_style = Style::default().fg(app.theme.dim).bg(bg);

    // (visible task index, line)
    let mut display_lines: Vec<(Option<usize>, Line)> = Vec::new();
    let mut index = 0;

    display_lines.push((None, Line::from(Span::styled(" Task", header_style))));
    let pending = app.store.pending_tasks();
    if pending.is_empty() {
        display_lines.push((
            None,
            Line::from(Span::styled("   No pending tasks!", empty_style)),
        ));
    }
    for task in pending {
        display_lines.push((Some(index), task_line(app, task, index == app.cursor, width)));
        index += 1;
    }

    display_lines.push((None, Line::from("")));
    let marker = if app.show_completed { "\u{25BE}" } else { "\u{25B8}" };
    display_lines.push((
        None,
        Line::from(vec![
            Span::styled(" Completed ", header_style),
            Span::styled(marker, Style::default().fg(app.theme.dim).bg(bg)),
        ]),
    ));
    if app.show_completed {
        let completed = app.store.completed_tasks();
        if completed.is_empty() {
            display_lines.push((
                None,
                Line::from(Span::styled("   No tasks completed yet.", empty_style)),
            ));
        }
        for task in completed {
            display_lines.push((Some(index), task_line(app, task, index == app.cursor, width)));
            index += 1;
        }
    }

    // Keep the cursor row on screen
    let visible_height = area.height as usize;
    if let Some(cursor_line) = display_lines
        .iter()
        .position(|(i, _)| *i == Some(app.cursor))
    {
        if cursor_line < app.scroll_offset {
            app.scroll_offset = cursor_line;
        } else if visible_height > 0 && cursor_line >= app.scroll_offset + visible_height {
            app.scroll_offset = cursor_line + 1 - visible_height;
        }
    }
    app.scroll_offset = app
        .scroll_offset
        .min(display_lines.len().saturating_sub(visible_height));

    let lines: Vec<Line> = display_lines
        .into_iter()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(_, line)| line)
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// One task row: cursor marker, checkbox, title, deadline right-aligned
fn task_line<'a>(app: &App, task: &Task, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let prefix = if is_cursor { " \u{25B8} " } else { "   " };
    let checkbox = format!("{} ", task.checkbox());
    let deadline = format_deadline_display(task.deadline, app.today);
    let due_date = task.deadline.map(|d| d.date()).filter(|_| !task.is_completed);
    let overdue = due_date.is_some_and(|d| d < app.today);
    let due_today = due_date == Some(app.today);

    let fixed = display_width(prefix) + display_width(&checkbox);
    let deadline_width = if deadline.is_empty() {
        0
    } else {
        display_width(&deadline) + 3
    };
    let title_budget = width.saturating_sub(fixed + deadline_width).max(1);
    let title = truncate_to_width(&task.title, title_budget);

    let mut title_style = Style::default().fg(app.theme.task_color(task.is_completed)).bg(bg);
    if task.is_completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if is_cursor {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let checkbox_color = if task.is_completed {
        app.theme.green
    } else {
        app.theme.text
    };

    let mut spans = vec![
        Span::styled(prefix, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(checkbox, Style::default().fg(checkbox_color).bg(bg)),
        Span::styled(title.clone(), title_style),
    ];

    let used = fixed + display_width(&title);
    let tail = if deadline.is_empty() {
        0
    } else {
        display_width(&deadline) + 1
    };
    let pad = width.saturating_sub(used + tail);
    if !deadline.is_empty() {
        spans.push(Span::styled(" ".repeat(pad.max(1)), Style::default().bg(bg)));
        let deadline_color = if overdue {
            app.theme.red
        } else if due_today {
            app.theme.yellow
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(
            deadline,
            Style::default().fg(deadline_color).bg(bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    } else if is_cursor {
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render_list(app: &mut App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, area| {
            render_task_list(frame, app, area);
        })
    }

    #[test]
    fn empty_sections() {
        let mut app = app_with_tasks(&[]);
        let output = render_list(&mut app, TERM_W, 10);
        assert!(output.contains("No pending tasks!"));
        assert!(output.contains("No tasks completed yet."));
        assert!(output.contains("Completed \u{25BE}"));
    }

    #[test]
    fn collapsed_completed_section_hides_rows() {
        let mut app = app_with_tasks(&[("Open", None, false), ("Done thing", None, true)]);
        app.show_completed = false;
        let output = render_list(&mut app, TERM_W, 10);
        assert!(output.contains("[ ] Open"));
        assert!(!output.contains("Done thing"));
        assert!(output.contains("Completed \u{25B8}"));
    }

    #[test]
    fn rows_show_relative_deadlines() {
        let mut app = app_with_tasks(&[
            ("Standup", Some(0), false),
            ("Review", Some(2), false),
            ("Old bill", Some(-3), false),
        ]);
        app.store.toggle_deadline_sort();
        let output = render_list(&mut app, TERM_W, 10);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("Old bill"));
        assert!(lines[1].ends_with("5/11/25 at 09:00"));
        assert!(lines[2].contains("Standup"));
        assert!(lines[2].ends_with("Today at 09:00"));
        assert!(lines[3].contains("Review"));
        assert!(lines[3].ends_with("Fri at 09:00"));
    }

    #[test]
    fn deadline_colors_follow_urgency() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut app = app_with_tasks(&[
            ("Old bill", Some(-3), false),
            ("Standup", Some(0), false),
            ("Review", Some(2), false),
            ("Done today", Some(0), true),
        ]);
        app.store.toggle_deadline_sort();
        let mut terminal = Terminal::new(TestBackend::new(TERM_W, 10)).unwrap();
        terminal
            .draw(|frame| render_task_list(frame, &mut app, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();

        // last deadline character sits just before the trailing space
        let fg = |row: u16| buf[(TERM_W - 2, row)].fg;
        assert_eq!(fg(1), app.theme.red);
        assert_eq!(fg(2), app.theme.yellow);
        assert_eq!(fg(3), app.theme.dim);
        // rows 4 and 5 are the blank line and the Completed header
        assert_eq!(fg(6), app.theme.dim);
    }

    #[test]
    fn cursor_row_is_marked() {
        let mut app = app_with_tasks(&[("First", Some(1), false), ("Second", Some(2), false)]);
        app.store.toggle_deadline_sort();
        app.cursor = 1;
        let output = render_list(&mut app, TERM_W, 10);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[2].starts_with(" \u{25B8} [ ] Second"));
        assert!(lines[1].starts_with("   [ ] First"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "A very long task title that will never fit in a narrow terminal";
        let mut app = app_with_tasks(&[(long, Some(1), false)]);
        let output = render_list(&mut app, 40, 5);
        let row = output.lines().nth(1).unwrap();
        assert!(row.contains('\u{2026}'));
        assert!(row.ends_with("Tomorrow at 09:00"));
        assert!(display_width(row) <= 40);
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let tasks: Vec<(String, Option<i64>, bool)> = (0..20)
            .map(|i| (format!("Task {:02}", i), Some(i), false))
            .collect();
        let refs: Vec<(&str, Option<i64>, bool)> =
            tasks.iter().map(|(t, d, c)| (t.as_str(), *d, *c)).collect();
        let mut app = app_with_tasks(&refs);
        app.store.toggle_deadline_sort();
        app.cursor = 15;
        let output = render_list(&mut app, TERM_W, 6);
        assert!(output.contains("Task 15"));
        assert!(!output.contains("Task 00"));
        assert!(app.scroll_offset > 0);
    }
}
