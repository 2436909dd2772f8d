//! In-memory logger that captures lines instead of printing them.
use std::sync::Mutex;

use super::types::{Level, Log};

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Level the line was logged at.
    pub level: Level,
    /// Message text.
    pub message: String,
}

/// Implement the methods of [`Log`] by pushing a [`LogEntry`] with the
/// matching [`Level`] onto `self.entries`.
macro_rules! buffer_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.push(Level::$level, msg);
            }
        )+
    };
}

/// Logger that buffers every line in memory.
///
/// Used to inspect exactly what a command reported.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(LogEntry {
                level,
                message: msg.to_string(),
            });
        }
    }

    /// Return a copy of all captured entries, in logging order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Return the captured messages logged at `level`.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Return `true` if any captured line, at any level, equals `msg`.
    #[must_use]
    pub fn contains(&self, msg: &str) -> bool {
        self.entries().iter().any(|e| e.message == msg)
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn captures_entries_in_order() {
        let log = BufferedLog::new();
        log.stage("Backing up shell");
        log.info("one");
        log.warn("two");
        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Level::Stage);
        assert_eq!(entries[1].message, "one");
        assert_eq!(entries[2].level, Level::Warn);
    }

    #[test]
    fn messages_filters_by_level() {
        let log = BufferedLog::new();
        log.info("ok");
        log.error("bad");
        log.error("worse");
        assert_eq!(log.messages(Level::Error), vec!["bad", "worse"]);
        assert_eq!(log.messages(Level::Info), vec!["ok"]);
    }

    #[test]
    fn log_dispatches_on_level() {
        let log = BufferedLog::new();
        log.log(Level::Debug, "hidden");
        assert_eq!(log.messages(Level::Debug), vec!["hidden"]);
        assert!(log.contains("hidden"));
        assert!(!log.contains("shown"));
    }
}
