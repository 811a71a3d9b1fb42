use chrono::NaiveDateTime;
use tracing::warn;

use crate::model::task::{Task, TaskId};
use crate::ops::deadline::{DeadlineInput, parse_deadline};
use crate::ops::task_store::TaskStore;

/// Error type for script parsing
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' needs {what}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        what: &'static str,
    },
    #[error("line {line}: invalid deadline '{text}' (expected YYYY-MM-DD [HH:MM])")]
    InvalidDeadline { line: usize, text: String },
    #[error("line {line}: unexpected argument '{arg}' to '{command}'")]
    UnexpectedArgument {
        line: usize,
        command: &'static str,
        arg: String,
    },
}

/// How a script names a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRef {
    /// 1-based position in the listing (pending, then completed)
    Position(usize),
    /// Leading characters of the task id
    IdPrefix(String),
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        deadline: Option<NaiveDateTime>,
    },
    Toggle(TaskRef),
    Remove(TaskRef),
    Sort,
    ClearSort,
    Open,
    Close,
    Print,
}

/// Shortest id prefix accepted as a reference
pub const MIN_ID_PREFIX: usize = 4;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a whole script. Blank lines and `#` comments are skipped.
/// Returns each command with its 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push((idx + 1, parse_line(line, idx + 1)?));
    }
    Ok(commands)
}

fn parse_line(line: &str, line_no: usize) -> Result<Command, ScriptError> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    match word {
        "add" => parse_add(rest, line_no),
        "toggle" => Ok(Command::Toggle(parse_ref(rest, "toggle", line_no)?)),
        "remove" | "rm" => Ok(Command::Remove(parse_ref(rest, "remove", line_no)?)),
        "sort" => no_args(rest, "sort", line_no, Command::Sort),
        "clear-sort" => no_args(rest, "clear-sort", line_no, Command::ClearSort),
        "open" => no_args(rest, "open", line_no, Command::Open),
        "close" => no_args(rest, "close", line_no, Command::Close),
        "print" => no_args(rest, "print", line_no, Command::Print),
        other => Err(ScriptError::UnknownCommand {
            line: line_no,
            command: other.to_string(),
        }),
    }
}

/// `add <title> [@ <date> [time]]`. The title is kept verbatim (it may be
/// blank, which the store ignores).
fn parse_add(rest: &str, line_no: usize) -> Result<Command, ScriptError> {
    let Some((title, when)) = rest.rsplit_once(" @ ").or_else(|| {
        rest.strip_prefix("@ ").map(|when| ("", when))
    }) else {
        return Ok(Command::Add {
            title: rest.to_string(),
            deadline: None,
        });
    };

    let mut parts = when.split_whitespace();
    let date = parts.next().unwrap_or("");
    let time = parts.next().unwrap_or("");
    if let Some(extra) = parts.next() {
        return Err(ScriptError::UnexpectedArgument {
            line: line_no,
            command: "add",
            arg: extra.to_string(),
        });
    }
    let deadline = match parse_deadline(date, time) {
        DeadlineInput::Valid(dt) => Some(dt),
        DeadlineInput::NoDeadline => {
            return Err(ScriptError::MissingArgument {
                line: line_no,
                command: "add",
                what: "a date after '@'",
            });
        }
        DeadlineInput::Invalid => {
            return Err(ScriptError::InvalidDeadline {
                line: line_no,
                text: when.trim().to_string(),
            });
        }
    };
    Ok(Command::Add {
        title: title.to_string(),
        deadline,
    })
}

fn parse_ref(rest: &str, command: &'static str, line_no: usize) -> Result<TaskRef, ScriptError> {
    let mut parts = rest.split_whitespace();
    let Some(word) = parts.next() else {
        return Err(ScriptError::MissingArgument {
            line: line_no,
            command,
            what: "a task position or id",
        });
    };
    if let Some(extra) = parts.next() {
        return Err(ScriptError::UnexpectedArgument {
            line: line_no,
            command,
            arg: extra.to_string(),
        });
    }
    // `#` marks an id prefix, which may then be all digits
    let (word, explicit_id) = match word.strip_prefix('#') {
        Some(id) => (id, true),
        None => (word, false),
    };
    if !explicit_id {
        if let Ok(n) = word.parse::<usize>() {
            return Ok(TaskRef::Position(n));
        }
    }
    if word.len() < MIN_ID_PREFIX {
        return Err(ScriptError::MissingArgument {
            line: line_no,
            command,
            what: "an id prefix of at least 4 characters",
        });
    }
    Ok(TaskRef::IdPrefix(word.to_ascii_lowercase()))
}

fn no_args(
    rest: &str,
    command: &'static str,
    line_no: usize,
    cmd: Command,
) -> Result<Command, ScriptError> {
    if rest.is_empty() {
        Ok(cmd)
    } else {
        Err(ScriptError::UnexpectedArgument {
            line: line_no,
            command,
            arg: rest.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Tasks in listing order: the pending view followed by the completed view
pub fn listing(store: &TaskStore) -> impl Iterator<Item = &Task> {
    store.pending_tasks().iter().chain(store.completed_tasks())
}

/// Resolve a reference against the store's current listing.
/// An id prefix must match exactly one task.
pub fn resolve_ref(store: &TaskStore, task_ref: &TaskRef) -> Option<TaskId> {
    match task_ref {
        TaskRef::Position(n) => n
            .checked_sub(1)
            .and_then(|i| listing(store).nth(i))
            .map(|t| t.id),
        TaskRef::IdPrefix(prefix) => {
            let mut matches = store
                .tasks()
                .iter()
                .filter(|t| t.id.canonical().starts_with(prefix.as_str()));
            match (matches.next(), matches.next()) {
                (Some(task), None) => Some(task.id),
                _ => None,
            }
        }
    }
}

/// Apply one command. `print` is handed to `emit`; every other command
/// mutates the store. Unresolved references are skipped.
pub fn apply(
    store: &mut TaskStore,
    line_no: usize,
    command: &Command,
    emit: &mut impl FnMut(&TaskStore),
) {
    match command {
        Command::Add { title, deadline } => {
            store.add_task(title, *deadline);
        }
        Command::Toggle(task_ref) => match resolve_ref(store, task_ref) {
            Some(id) => {
                store.toggle_task_status(id);
            }
            None => warn!(line = line_no, reference = ?task_ref, "no task to toggle"),
        },
        Command::Remove(task_ref) => match resolve_ref(store, task_ref) {
            Some(id) => {
                store.remove_task(id);
            }
            None => warn!(line = line_no, reference = ?task_ref, "no task to remove"),
        },
        Command::Sort => store.toggle_deadline_sort(),
        Command::ClearSort => store.clear_sort(),
        Command::Open => store.open_add_task_dialog(),
        Command::Close => store.close_add_task_dialog(),
        Command::Print => emit(&*store),
    }
}

/// Parse and run a script against `store`, calling `emit` for every
/// `print` and once more at the end.
pub fn run_script(
    store: &mut TaskStore,
    text: &str,
    mut emit: impl FnMut(&TaskStore),
) -> Result<(), ScriptError> {
    let commands = parse_script(text)?;
    for (line_no, command) in &commands {
        apply(store, *line_no, command, &mut emit);
    }
    emit(&*store);
    Ok(())
}
