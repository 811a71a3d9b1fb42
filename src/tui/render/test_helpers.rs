use chrono::{Duration, NaiveDate, NaiveDateTime};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::Config;
use crate::ops::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Fixed "today" for rendering tests: Wednesday 2025-05-14
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
}

/// `days` after test_today() at the given time
pub fn at_day(days: i64, h: u32, m: u32) -> Option<NaiveDateTime> {
    (test_today() + Duration::days(days)).and_hms_opt(h, m, 0)
}

/// Build an App from `(title, deadline day offset, completed)` triples.
/// Deadlines are at 09:00.
pub fn app_with_tasks(tasks: &[(&str, Option<i64>, bool)]) -> App {
    let mut store = TaskStore::new();
    for (title, days, completed) in tasks {
        let deadline = days.and_then(|d| at_day(d, 9, 0));
        if let Some(id) = store.add_task(title, deadline) {
            if *completed {
                store.toggle_task_status(id);
            }
        }
    }
    let mut app = App::new(store, &Config::default());
    app.today = test_today();
    app
}
