//! Core types for provisioning scripts

use std::fmt;

/// Outcome of running an action.
///
/// A status of zero means success; anything else is a failure, with `output`
/// carrying the diagnostic text (merged stdout and stderr for commands, an
/// error message for file operations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// Exit status, 0 on success
    pub status: i32,
    /// Diagnostic output
    pub output: String,
}

impl ActionResult {
    /// Create a result from a status and output.
    pub fn new(status: i32, output: impl Into<String>) -> Self {
        Self {
            status,
            output: output.into(),
        }
    }

    /// A successful result without output.
    pub fn success() -> Self {
        Self::default()
    }

    /// A failed result with status 1.
    pub fn failure(output: impl Into<String>) -> Self {
        Self::new(1, output)
    }

    /// Whether the status is zero.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl From<std::io::Error> for ActionResult {
    fn from(error: std::io::Error) -> Self {
        Self::new(error.raw_os_error().unwrap_or(1), error.to_string())
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.output.is_empty() {
            write!(f, "status {}", self.status)
        } else {
            write!(f, "status {}: {}", self.status, self.output)
        }
    }
}
