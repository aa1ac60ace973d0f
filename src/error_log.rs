use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, warn};

/// Default location of the error log, relative to the working directory.
pub const DEFAULT_ERROR_LOG_PATH: &str = "error.log";

/// Append-only text log with one `<timestamp>: <message>` line per error.
///
/// The program never reads it back.
#[derive(Clone, Debug)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{}", format_entry(message))?;
        Ok(())
    }

    /// Record an error and mirror it to the tracing output. A log file that
    /// cannot be written is reported through tracing only.
    pub fn record(&self, message: &str) {
        error!(%message, "recording error");
        if let Err(err) = self.append(message) {
            warn!(error = %err, path = %self.path.display(), "Failed to write error log");
        }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG_PATH)
    }
}

fn format_entry(message: &str) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    // Keep one entry per line even for multi-line upstream errors.
    let flat = message.replace(['\r', '\n'], " ");
    format!("{now}: {flat}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        log.append("first").unwrap();
        log.append("second\nline").unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second line"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn entry_starts_with_timestamp() {
        let entry = format_entry("boom");
        let (stamp, rest) = entry.split_once(": ").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(rest, "boom");
    }

    #[test]
    fn record_survives_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = ErrorLog::new(dir.path());
        log.record("lost");
    }
}
