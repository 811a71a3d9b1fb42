use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{SortType, Task};
use crate::ops::TaskStore;
use crate::ops::deadline::format_deadline_display;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_label: Option<String>,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct SnapshotJson {
    pub total: usize,
    pub completed: usize,
    pub sort: SortType,
    pub ascending: bool,
    pub dialog_open: bool,
    pub pending: Vec<TaskJson>,
    pub completed_tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task, today: NaiveDate) -> TaskJson {
    TaskJson {
        id: task.id.canonical(),
        title: task.title.clone(),
        deadline: task
            .deadline
            .map(|d| d.format("%Y-%m-%dT%H:%M").to_string()),
        deadline_label: task
            .deadline
            .map(|_| format_deadline_display(task.deadline, today)),
        completed: task.is_completed,
    }
}

pub fn snapshot_json(store: &TaskStore, today: NaiveDate) -> SnapshotJson {
    SnapshotJson {
        total: store.total_count(),
        completed: store.completed_count(),
        sort: store.sort_type(),
        ascending: store.sort_ascending(),
        dialog_open: store.is_dialog_open(),
        pending: store
            .pending_tasks()
            .iter()
            .map(|t| task_to_json(t, today))
            .collect(),
        completed_tasks: store
            .completed_tasks()
            .iter()
            .map(|t| task_to_json(t, today))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `  3. [ ] Title  (Tomorrow at 14:00)  #1a2b3c4d`
pub fn format_task_line(position: usize, task: &Task, today: NaiveDate) -> String {
    let mut line = format!("{:>3}. {} {}", position, task.checkbox(), task.title);
    if task.deadline.is_some() {
        line.push_str(&format!("  ({})", format_deadline_display(task.deadline, today)));
    }
    line.push_str(&format!("  #{}", task.id.short()));
    line
}

/// Text snapshot: a summary line, then the pending and completed sections.
/// Positions match the references accepted by `toggle`/`remove`.
pub fn render_text(store: &TaskStore, today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();
    let sort = match store.sort_type() {
        SortType::None => String::new(),
        SortType::Deadline => format!(
            ", sorted by deadline {}",
            if store.sort_ascending() { "asc" } else { "desc" }
        ),
    };
    lines.push(format!(
        "{}/{} completed{}",
        store.completed_count(),
        store.total_count(),
        sort
    ));

    lines.push("Task".to_string());
    if store.pending_tasks().is_empty() {
        lines.push("  No pending tasks!".to_string());
    }
    for (i, task) in store.pending_tasks().iter().enumerate() {
        lines.push(format_task_line(i + 1, task, today));
    }

    let offset = store.pending_tasks().len();
    lines.push("Completed".to_string());
    if store.completed_tasks().is_empty() {
        lines.push("  No tasks completed yet.".to_string());
    }
    for (i, task) in store.completed_tasks().iter().enumerate() {
        lines.push(format_task_line(offset + i + 1, task, today));
    }
    lines
}
