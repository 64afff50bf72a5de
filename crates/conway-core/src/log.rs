//! Injected logging capability.
//!
//! The store and the service never reach for a process-wide logger.
//! They hold an `Arc<dyn EventLog>` handed to them at construction, and
//! the binary decides what sits behind it. [`TracingLog`] forwards to the
//! `tracing` facade; [`MemoryLog`] keeps entries for assertions in tests.

use std::sync::Mutex;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Fine-grained diagnostics.
    Trace,
    /// Diagnostics useful while developing.
    Debug,
    /// Normal operation.
    Info,
    /// A request failed for a client-side reason.
    Warn,
    /// An operation failed on the server side.
    Error,
}

/// A sink for log entries.
pub trait EventLog: Send + Sync {
    /// Record `message` at `level`.
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards entries to `tracing` under the `conway` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "conway", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "conway", "{message}"),
            LogLevel::Info => tracing::info!(target: "conway", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "conway", "{message}"),
            LogLevel::Error => tracing::error!(target: "conway", "{message}"),
        }
    }
}

/// Discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl EventLog for NoopLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries recorded so far, oldest first.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Whether any entry at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl EventLog for MemoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.push((level, message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_order() {
        let log = MemoryLog::new();
        log.log(LogLevel::Info, "first");
        log.log(LogLevel::Warn, "second");
        assert_eq!(
            log.entries(),
            vec![
                (LogLevel::Info, "first".to_owned()),
                (LogLevel::Warn, "second".to_owned())
            ]
        );
        assert!(log.contains(LogLevel::Warn, "sec"));
        assert!(!log.contains(LogLevel::Error, "sec"));
    }
}
