use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier, unique for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Draw a fresh random id
    pub fn new_v4() -> Self {
        TaskId(Uuid::new_v4())
    }

    /// Wrap an existing UUID (used by tests and id lookups)
    pub fn from_uuid(uuid: Uuid) -> Self {
        TaskId(uuid)
    }

    /// Canonical string form: lowercase, hyphenated
    pub fn canonical(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// First 8 hex digits, for compact display
    pub fn short(&self) -> String {
        let mut s = self.canonical();
        s.truncate(8);
        s
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display title, never blank
    pub title: String,
    /// Local date and time the task is due, if any
    pub deadline: Option<NaiveDateTime>,
    pub is_completed: bool,
}

impl Task {
    /// Create a pending task with a fresh id
    pub fn new(title: impl Into<String>, deadline: Option<NaiveDateTime>) -> Self {
        Task::with_id(TaskId::new_v4(), title, deadline)
    }

    pub fn with_id(id: TaskId, title: impl Into<String>, deadline: Option<NaiveDateTime>) -> Self {
        Task {
            id,
            title: title.into(),
            deadline,
            is_completed: false,
        }
    }

    /// Copy of this task with the completion flag flipped, same id
    pub fn toggled(&self) -> Task {
        Task {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// The checkbox drawn in front of the title
    pub fn checkbox(&self) -> &'static str {
        if self.is_completed { "[x]" } else { "[ ]" }
    }
}

/// Ordering applied to the derived task views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// No explicit sort; views fall back to id order so they stay deterministic
    #[default]
    None,
    /// Chronological by deadline; absent deadlines last when ascending,
    /// first when descending
    Deadline,
}

impl SortType {
    pub fn as_str(self) -> &'static str {
        match self {
            SortType::None => "none",
            SortType::Deadline => "deadline",
        }
    }
}
