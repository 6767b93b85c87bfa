// ABOUTME: LogSink capability trait and its console, file, and capture implementations

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Destination for log text emitted by the view-model.
///
/// Implementations never fail observably: a sink that hits an I/O error
/// reports it through tracing and swallows it. Logging must not crash the
/// caller.
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send + Sync {
    fn log_message(&self, message: &str);
}

/// Reference implementation that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log_message(&self, _message: &str) {}
}

/// Forwards messages to the tracing facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log_message(&self, message: &str) {
        tracing::info!(target: "logpane::sink", "{message}");
    }
}

/// Appends one line per message to a file.
///
/// Opening the file is the only fallible step; write failures are warned
/// about and dropped.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Opens (or creates) the file in append mode.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn log_message(&self, message: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(file, "{message}") {
            warn!(path = %self.path.display(), %error, "failed to write log message");
        }
    }
}

/// Captures messages in memory for later inspection. Used as the capturing
/// fake in tests and handy for embedders that render the log themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for MemorySink {
    fn log_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_sink_records_messages_in_order() {
        let sink = MemorySink::new();
        sink.log_message("first");
        sink.log_message("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn file_sink_appends_one_line_per_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pane.log");

        let sink = FileSink::create(&path).expect("create sink");
        sink.log_message("build failed");
        sink.log_message("retrying");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(contents, "build failed\nretrying\n");
    }

    #[test]
    fn file_sink_creation_fails_for_missing_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("pane.log");
        assert!(FileSink::create(path).is_err());
    }

    #[test]
    fn noop_sink_accepts_any_message() {
        NoopSink.log_message("");
        NoopSink.log_message("ignored");
    }
}
