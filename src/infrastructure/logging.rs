use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot install log subscriber: {0}")]
    Install(String),
}

/// Routes `tracing` output to an append-only file.
///
/// The terminal belongs to the UI, so logs never go to stdout or stderr.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_file_logging(path: &Path) -> Result<(), LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_logging_writes_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dexcard.log");

        init_file_logging(&path).unwrap();
        tracing::error!(token = 3, "lookup failed during logging test");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("lookup failed during logging test"));
        assert!(contents.contains("token=3"));
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("dexcard.log");

        let err = init_file_logging(&path).unwrap_err();
        assert!(matches!(err, LoggingError::Open { .. }));
        assert!(err.to_string().contains("no-such-dir"));
    }
}
