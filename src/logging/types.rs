//! Core logging types: message levels and the [`Log`] trait.

/// Level of a single logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Stage header (major section).
    Stage,
    /// Informational message.
    Info,
    /// Debug message, hidden on the console unless verbose.
    Debug,
    /// Warning: something was skipped.
    Warn,
    /// Error: something failed.
    Error,
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (direct output through `tracing`)
/// and [`BufferedLog`](super::buffered::BufferedLog) (in-memory capture)
/// implement this trait, so command code can report without knowing where
/// its lines end up.
pub trait Log {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);

    /// Log `msg` at the given level.
    fn log(&self, level: Level, msg: &str) {
        match level {
            Level::Stage => self.stage(msg),
            Level::Info => self.info(msg),
            Level::Debug => self.debug(msg),
            Level::Warn => self.warn(msg),
            Level::Error => self.error(msg),
        }
    }
}
