use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    /// No subscriber is installed
    Off,
}

/// Error type for logging setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log level '{level}': {source}")]
    InvalidLevel {
        level: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Pick the log target: an explicit file wins, then the configured file,
/// then `fallback`.
pub fn resolve_target(config: &LogConfig, explicit: Option<&Path>, fallback: LogTarget) -> LogTarget {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.file.as_ref().map(PathBuf::from))
        .map(LogTarget::File)
        .unwrap_or(fallback)
}

/// Build the filter from RUST_LOG, or the configured level if unset
pub fn build_filter(level: &str) -> Result<EnvFilter, LogError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LogError::InvalidLevel {
        level: level.to_string(),
        source: e,
    })
}

/// Install a global fmt subscriber writing to `target`
pub fn init_logging(config: &LogConfig, target: &LogTarget) -> Result<(), LogError> {
    let builder = match target {
        LogTarget::Off => return Ok(()),
        _ => tracing_subscriber::fmt().with_env_filter(build_filter(&config.level)?),
    };

    let result = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LogError::OpenError {
                    path: path.clone(),
                    source: e,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        _ => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|_| LogError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = LogConfig {
            file: Some("/tmp/from-config.log".into()),
            ..Default::default()
        };
        let target = resolve_target(&config, Some(Path::new("/tmp/cli.log")), LogTarget::Off);
        assert_eq!(target, LogTarget::File(PathBuf::from("/tmp/cli.log")));
    }

    #[test]
    fn configured_file_before_fallback() {
        let config = LogConfig {
            file: Some("/tmp/from-config.log".into()),
            ..Default::default()
        };
        let target = resolve_target(&config, None, LogTarget::Stderr);
        assert_eq!(target, LogTarget::File(PathBuf::from("/tmp/from-config.log")));
    }

    #[test]
    fn fallback_when_nothing_configured() {
        let config = LogConfig::default();
        assert_eq!(
            resolve_target(&config, None, LogTarget::Stderr),
            LogTarget::Stderr
        );
        assert_eq!(resolve_target(&config, None, LogTarget::Off), LogTarget::Off);
    }

    #[test]
    fn off_installs_nothing() {
        assert!(init_logging(&LogConfig::default(), &LogTarget::Off).is_ok());
    }
}
