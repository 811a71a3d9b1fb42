use std::cmp::Ordering;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::model::task::{SortType, Task, TaskId};

/// In-memory task collection with derived pending/completed views.
///
/// Every mutating call recomputes both views before returning, so readers
/// never observe a stale ordering. `revision()` increases on each change and
/// lets a UI decide whether it needs to re-read.
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Backing sequence in insertion order
    tasks: Vec<Task>,
    sort_type: SortType,
    sort_ascending: bool,
    dialog_open: bool,
    pending: Vec<Task>,
    completed: Vec<Task>,
    revision: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            sort_type: SortType::None,
            sort_ascending: true,
            dialog_open: false,
            pending: Vec::new(),
            completed: Vec::new(),
            revision: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new pending task. Blank titles are ignored. The add-task
    /// dialog is closed either way.
    pub fn add_task(&mut self, title: &str, deadline: Option<NaiveDateTime>) -> Option<TaskId> {
        let created = if title.trim().is_empty() {
            None
        } else {
            let id = self.fresh_id();
            self.tasks.push(Task::with_id(id, title, deadline));
            debug!(task_id = %id, has_deadline = deadline.is_some(), "task added");
            Some(id)
        };
        self.close_add_task_dialog();
        if created.is_some() {
            self.changed();
        }
        created
    }

    /// Remove the task with this id. Unknown ids are a no-op.
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(task_id = %id, "task removed");
            self.changed();
        }
        removed
    }

    /// Flip the completion flag of a task in place. Unknown ids are a no-op.
    pub fn toggle_task_status(&mut self, id: TaskId) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks[idx] = self.tasks[idx].toggled();
        debug!(task_id = %id, completed = self.tasks[idx].is_completed, "task status toggled");
        self.changed();
        true
    }

    /// Start sorting by deadline (ascending), or reverse the direction if
    /// already sorting by deadline.
    pub fn toggle_deadline_sort(&mut self) {
        if self.sort_type == SortType::Deadline {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_type = SortType::Deadline;
            self.sort_ascending = true;
        }
        debug!(ascending = self.sort_ascending, "deadline sort toggled");
        self.changed();
    }

    pub fn clear_sort(&mut self) {
        self.sort_type = SortType::None;
        self.sort_ascending = true;
        debug!("sort cleared");
        self.changed();
    }

    pub fn open_add_task_dialog(&mut self) {
        if !self.dialog_open {
            self.dialog_open = true;
            self.revision += 1;
        }
    }

    pub fn close_add_task_dialog(&mut self) {
        if self.dialog_open {
            self.dialog_open = false;
            self.revision += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------------

    /// Incomplete tasks in the current sort order
    pub fn pending_tasks(&self) -> &[Task] {
        &self.pending
    }

    /// Completed tasks in the current sort order
    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.total_count() - self.completed_count()
    }

    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn changed(&mut self) {
        self.pending = self.derive_view(false);
        self.completed = self.derive_view(true);
        self.revision += 1;
    }

    fn derive_view(&self, completed: bool) -> Vec<Task> {
        let mut view: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.is_completed == completed)
            .cloned()
            .collect();
        match self.sort_type {
            SortType::Deadline => {
                let ascending = self.sort_ascending;
                view.sort_by(|a, b| compare_deadlines(a.deadline, b.deadline, ascending));
            }
            SortType::None => view.sort_by_cached_key(|t| t.id.canonical()),
        }
        view
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Chronological comparison with absent deadlines after present ones.
/// Descending is the exact reverse, so absent deadlines lead. Ties stay
/// `Equal` and keep backing order under the stable sort.
fn compare_deadlines(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    ascending: bool,
) -> Ordering {
    let order = match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if ascending { order } else { order.reverse() }
}
