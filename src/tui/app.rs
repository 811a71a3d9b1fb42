use std::io;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::model::{Config, Task, TaskId};
use crate::ops::TaskStore;
use crate::ops::deadline::{DeadlineInput, parse_deadline};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The add-task dialog is open
    AddTask,
    /// Waiting for y/n on a delete
    Confirm,
}

/// Field of the add-task dialog that receives typed text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Date,
    Time,
}

/// Contents of the add-task dialog
#[derive(Debug, Clone, Default)]
pub struct AddTaskForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, only used with a date
    pub time: String,
    pub focus: FormField,
}

impl AddTaskForm {
    pub fn deadline_input(&self) -> DeadlineInput {
        parse_deadline(&self.date, &self.time)
    }

    /// Submitting needs a non-blank title and a well-formed deadline
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.deadline_input().is_invalid()
    }

    pub fn has_deadline(&self) -> bool {
        !self.date.is_empty() || !self.time.is_empty()
    }

    pub fn clear_deadline(&mut self) {
        self.date.clear();
        self.time.clear();
        if self.focus == FormField::Time {
            self.focus = FormField::Date;
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::Time => &mut self.time,
        }
    }

    /// Next field; the time field is skipped until a date is entered
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Date,
            FormField::Date if self.date.trim().is_empty() => FormField::Title,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Title,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormField::Title if self.date.trim().is_empty() => FormField::Date,
            FormField::Title => FormField::Time,
            FormField::Date => FormField::Title,
            FormField::Time => FormField::Date,
        };
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into `visible_tasks()`
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// Completed section expanded
    pub show_completed: bool,
    /// Help overlay visible
    pub show_help: bool,
    pub show_key_hints: bool,
    pub form: AddTaskForm,
    /// Task awaiting delete confirmation
    pub confirm_delete: Option<TaskId>,
    /// Reference date for relative deadline labels
    pub today: NaiveDate,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        App {
            store,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            cursor: 0,
            scroll_offset: 0,
            show_completed: config.ui.show_completed,
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            form: AddTaskForm::default(),
            confirm_delete: None,
            today: Local::now().date_naive(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.store.is_dialog_open() {
            Mode::AddTask
        } else if self.confirm_delete.is_some() {
            Mode::Confirm
        } else {
            Mode::Navigate
        }
    }

    /// Tasks the cursor can land on: pending, then completed when expanded
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let completed: &[Task] = if self.show_completed {
            self.store.completed_tasks()
        } else {
            &[]
        };
        self.store
            .pending_tasks()
            .iter()
            .chain(completed.iter())
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Put the cursor on a task, if it is visible
    pub fn select(&mut self, id: TaskId) {
        if let Some(pos) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }

    pub fn open_add_dialog(&mut self) {
        self.form = AddTaskForm::default();
        self.store.open_add_task_dialog();
    }

    pub fn cancel_add_dialog(&mut self) {
        self.form = AddTaskForm::default();
        self.store.close_add_task_dialog();
    }

    /// Add the task described by the form. Returns false (dialog stays open)
    /// when the form can't be submitted.
    pub fn submit_add_dialog(&mut self) -> bool {
        if !self.form.can_submit() {
            return false;
        }
        let deadline = self.form.deadline_input().deadline();
        let title = std::mem::take(&mut self.form.title);
        self.form = AddTaskForm::default();
        if let Some(id) = self.store.add_task(&title, deadline) {
            self.select(id);
        }
        true
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.store.toggle_task_status(id);
            self.clamp_cursor();
        }
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = self.selected_task().map(|t| t.id);
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.confirm_delete.take() {
            self.store.remove_task(id);
            self.clamp_cursor();
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn toggle_completed_section(&mut self) {
        self.show_completed = !self.show_completed;
        self.clamp_cursor();
    }
}

/// Sample tasks relative to `today`, for `--seed`
pub fn seed_sample_tasks(store: &mut TaskStore, today: NaiveDate) {
    let at = |days: i64, h: u32, m: u32| -> Option<NaiveDateTime> {
        let date = today.checked_add_signed(ChronoDuration::days(days))?;
        NaiveTime::from_hms_opt(h, m, 0).map(|t| date.and_time(t))
    };
    store.add_task("Project meeting", at(1, 14, 0));
    store.add_task("Final presentation", at(5, 9, 30));
    store.add_task("Keep coding", at(0, 10, 0));
    store.add_task("Buy groceries", None);
}

pub fn run(config: &Config, seed: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::new();
    if seed {
        seed_sample_tasks(&mut store, Local::now().date_naive());
    }
    let mut app = App::new(store, config);
    info!(tasks = app.store.total_count(), "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        tasks = app.store.total_count(),
        completed = app.store.completed_count(),
        "tui exited"
    );
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key(app, key);
                }
            }
        } else {
            // keep relative labels right across midnight
            app.today = Local::now().date_naive();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
