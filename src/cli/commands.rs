use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dt", about = concat!("[x] daytask v", env!("CARGO_PKG_VERSION"), " - today's tasks, one screen"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read settings from this file instead of the default config path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Start the TUI with a few sample tasks
    #[arg(long)]
    pub seed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a task script and print the resulting lists
    Run(RunArgs),
    /// Print the relative label for a deadline
    When(WhenArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Script file (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,
    /// Output snapshots as JSON, one per line
    #[arg(long)]
    pub json: bool,
    /// Treat this date (YYYY-MM-DD) as today when formatting deadlines
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Args)]
pub struct WhenArgs {
    /// Deadline as YYYY-MM-DD, optionally followed by HH:MM
    pub deadline: String,
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    pub today: Option<String>,
}
