// SPDX-License-Identifier: Apache-2.0 OR MIT
// Handlers: the sinks a logger writes its entries to

use super::entry::LogEntry;
use super::formatter::{Formatter, LineFormatter};
use super::Severity;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Output sink for log entries
pub trait Handler: Send + Sync {
    /// Whether an entry at `severity` would be written
    fn is_handling(&self, severity: Severity) -> bool;

    /// Write a log entry to the sink
    fn handle(&self, entry: &LogEntry);

    /// Formatter used to render entries, if the handler renders text
    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        None
    }
}

/// Where a [`StreamHandler`] writes
pub enum Stream {
    Stderr,
    Stdout,
    File(Mutex<File>),
}

impl Stream {
    /// Open `path` for appending, creating it if needed
    pub fn append_to(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Stream::File(Mutex::new(file)))
    }

    fn write_line(&self, line: &str) {
        match self {
            Stream::Stderr => {
                let _ = writeln!(std::io::stderr().lock(), "{}", line);
            }
            Stream::Stdout => {
                let _ = writeln!(std::io::stdout().lock(), "{}", line);
            }
            Stream::File(file) => {
                let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writeln!(file, "{}", line);
            }
        }
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Stderr => write!(f, "Stderr"),
            Stream::Stdout => write!(f, "Stdout"),
            Stream::File(_) => write!(f, "File"),
        }
    }
}

/// Writes one formatted line per entry to stderr, stdout or a file
pub struct StreamHandler {
    stream: Stream,
    level: Severity,
    formatter: Arc<dyn Formatter>,
}

impl StreamHandler {
    /// Create a handler admitting entries at `level` or more severe
    pub fn new(stream: Stream, level: Severity) -> Self {
        Self {
            stream,
            level,
            formatter: Arc::new(LineFormatter),
        }
    }

    pub fn stderr(level: Severity) -> Self {
        Self::new(Stream::Stderr, level)
    }

    pub fn stdout(level: Severity) -> Self {
        Self::new(Stream::Stdout, level)
    }

    /// Replace the default line formatter
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    pub fn level(&self) -> Severity {
        self.level
    }
}

impl Handler for StreamHandler {
    fn is_handling(&self, severity: Severity) -> bool {
        severity.admitted_by(self.level)
    }

    fn handle(&self, entry: &LogEntry) {
        self.stream.write_line(&self.formatter.format(entry));
    }

    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        Some(Arc::clone(&self.formatter))
    }
}

/// Discards every entry
#[derive(Debug, Clone, Copy)]
pub struct NullHandler {
    level: Severity,
}

impl NullHandler {
    pub fn new(level: Severity) -> Self {
        Self { level }
    }
}

impl Default for NullHandler {
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

impl Handler for NullHandler {
    fn is_handling(&self, severity: Severity) -> bool {
        severity.admitted_by(self.level)
    }

    fn handle(&self, _entry: &LogEntry) {}
}

/// Handler that keeps every entry in memory, for assertions
#[derive(Debug, Default)]
pub struct TestHandler {
    entries: Mutex<Vec<LogEntry>>,
}

impl TestHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured entries, oldest first
    pub fn records(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// True if an entry with exactly this severity and message was captured
    pub fn has_record(&self, severity: Severity, message: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.severity == severity && e.get_message() == message)
    }

    pub fn has_emergency(&self, message: &str) -> bool {
        self.has_record(Severity::Emergency, message)
    }

    pub fn has_alert(&self, message: &str) -> bool {
        self.has_record(Severity::Alert, message)
    }

    pub fn has_critical(&self, message: &str) -> bool {
        self.has_record(Severity::Critical, message)
    }

    pub fn has_error(&self, message: &str) -> bool {
        self.has_record(Severity::Error, message)
    }

    pub fn has_warning(&self, message: &str) -> bool {
        self.has_record(Severity::Warning, message)
    }

    pub fn has_notice(&self, message: &str) -> bool {
        self.has_record(Severity::Notice, message)
    }

    pub fn has_info(&self, message: &str) -> bool {
        self.has_record(Severity::Info, message)
    }

    pub fn has_debug(&self, message: &str) -> bool {
        self.has_record(Severity::Debug, message)
    }
}

impl Handler for TestHandler {
    fn is_handling(&self, _severity: Severity) -> bool {
        true
    }

    fn handle(&self, entry: &LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }
}
