//! Logging and execution context
//!
//! The engine reports progress through the [`Logger`] trait so that it can be
//! used without depending on a particular console or system log.

use std::cell::RefCell;

/// Line-oriented sink for script progress and errors.
///
/// Implementations split multi-line text and emit each line separately.
pub trait Logger {
    /// Write an informational line
    fn write(&self, text: &str);

    /// Write an error line
    fn error(&self, text: &str);
}

/// Logger that discards everything
pub struct NoLog;

impl Logger for NoLog {
    fn write(&self, _text: &str) {}
    fn error(&self, _text: &str) {}
}

/// Severity of a recorded line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Written with [`Logger::write`]
    Info,
    /// Written with [`Logger::error`]
    Error,
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, oldest first
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Recorded text, ignoring levels
    pub fn texts(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(_, t)| t.clone()).collect()
    }

    fn push(&self, level: Level, text: &str) {
        let mut lines = self.lines.borrow_mut();
        for line in text.lines() {
            lines.push((level, line.to_string()));
        }
    }
}

impl Logger for MemoryLog {
    fn write(&self, text: &str) {
        self.push(Level::Info, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }
}

/// Context passed to action execute operations
pub struct ActionContext<'a> {
    /// Where actions report waiting and diagnostics
    pub logger: &'a dyn Logger,
}

impl<'a> ActionContext<'a> {
    /// Create a new action context
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self { logger }
    }
}
