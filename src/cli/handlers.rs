use std::io::Read;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::ops::TaskStore;
use crate::ops::deadline::{DeadlineInput, format_deadline_display, parse_deadline_str};
use crate::ops::script::run_script;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a non-TUI subcommand
pub fn dispatch(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run(args) => cmd_run(args),
        Commands::When(args) => cmd_when(args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `--today` if given, else the local date
fn resolve_today(arg: Option<&str>) -> Result<NaiveDate, String> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid --today '{}' (expected YYYY-MM-DD)", s)),
        None => Ok(Local::now().date_naive()),
    }
}

fn read_script(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = resolve_today(args.today.as_deref())?;
    let text = read_script(args.file.as_deref())?;

    let mut store = TaskStore::new();
    let mut snapshots = 0usize;
    let mut out_err: Option<serde_json::Error> = None;
    run_script(&mut store, &text, |store| {
        if args.json {
            match serde_json::to_string(&snapshot_json(store, today)) {
                Ok(line) => println!("{}", line),
                Err(e) => out_err = Some(e),
            }
        } else {
            if snapshots > 0 {
                println!();
            }
            for line in render_text(store, today) {
                println!("{}", line);
            }
        }
        snapshots += 1;
    })?;
    if let Some(e) = out_err {
        return Err(e.into());
    }

    debug!(
        snapshots,
        total = store.total_count(),
        revision = store.revision(),
        "script finished"
    );
    Ok(())
}

fn cmd_when(args: WhenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = resolve_today(args.today.as_deref())?;
    match parse_deadline_str(&args.deadline) {
        DeadlineInput::Valid(deadline) => {
            println!("{}", format_deadline_display(Some(deadline), today));
            Ok(())
        }
        DeadlineInput::NoDeadline | DeadlineInput::Invalid => Err(format!(
            "invalid deadline '{}' (expected YYYY-MM-DD [HH:MM])",
            args.deadline
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_today_is_parsed() {
        assert_eq!(
            resolve_today(Some("2025-05-14")),
            Ok(NaiveDate::from_ymd_opt(2025, 5, 14).unwrap())
        );
        assert!(resolve_today(Some("14/05/2025")).is_err());
    }

    #[test]
    fn missing_script_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_script(Some(&dir.path().join("nope.dt"))).unwrap_err();
        assert!(err.starts_with("cannot read"));
    }

    #[test]
    fn script_file_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.dt");
        std::fs::write(&path, "add Buy milk\n").unwrap();
        assert_eq!(read_script(Some(&path)).unwrap(), "add Buy milk\n");
    }
}
