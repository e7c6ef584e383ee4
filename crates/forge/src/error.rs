//! Error types for script assembly and execution.
//!
//! Both variants indicate a bug in the code building or starting the
//! script. Failures of the actions themselves are never errors; they are
//! reported as a failing [`ActionResult`](crate::ActionResult).

use thiserror::Error;

/// Errors raised by [`Script`](crate::Script).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The same action instance was appended twice
    #[error("Action was added twice: {title}")]
    DuplicateAction {
        /// Title of the offending action
        title: String,
    },

    /// The resume index does not name a step of the script
    #[error("Resume offset {resume} outside valid range of one through {count}")]
    ResumeOutOfRange {
        /// Requested 1-based step
        resume: usize,
        /// Number of steps in the script
        count: usize,
    },
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, ScriptError>;
