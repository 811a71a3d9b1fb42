use clap::Parser;
use daytask::cli::commands::Cli;
use daytask::cli::handlers;
use daytask::io::config_io;
use daytask::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The TUI owns the terminal, so it only logs to a file
    let fallback = if cli.command.is_none() {
        LogTarget::Off
    } else {
        LogTarget::Stderr
    };
    let target = logging::resolve_target(&config.log, cli.log_file.as_deref(), fallback);
    if let Err(e) = logging::init_logging(&config.log, &target) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        // No subcommand → launch TUI
        None => daytask::tui::run(&config, cli.seed),
        Some(command) => handlers::dispatch(command),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
