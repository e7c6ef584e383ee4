//! Error types for configuration fields.
//!
//! Validation problems with a single value are reported as [`FieldError`],
//! structural problems in a kiosk file as [`TextFileError`]. Everything else
//! (programming mistakes such as asking for a field that was never declared)
//! goes through [`Error`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A raw value failed the validation rule of its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Name of the field that rejected the value
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The value was empty but the field is mandatory.
    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("Missing value in field '{field}'"))
    }
}

/// A problem found while reading a kiosk file.
///
/// The line number is 1-based; zero means the problem concerns the file as a
/// whole (unreadable file, field missing from the file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileError {
    /// File being read
    pub path: PathBuf,
    /// Line number (1-indexed), or 0 for whole-file problems
    pub line: usize,
    /// Description of the problem
    pub message: String,
}

impl TextFileError {
    /// Create a new text file error.
    pub fn new(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for TextFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "({}) Error: {}", self.path.display(), self.message)
        } else {
            write!(
                f,
                "({}:{}) Error: {}",
                self.path.display(),
                self.line,
                self.message
            )
        }
    }
}

impl std::error::Error for TextFileError {}

/// Errors that can occur while working with a field set.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was rejected by its field
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A field name was looked up that the set does not declare
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A field with the same name was added twice
    #[error("field already exists: {0}")]
    DuplicateField(String),

    /// Only text-valued fields can hold the redaction sentinel
    #[error("field cannot be redacted: {0}")]
    NotRedactable(String),

    /// A field pattern is not a valid regular expression
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A field's built-in default does not satisfy its own rule
    #[error("invalid default for field '{field}': {message}")]
    InvalidDefault {
        /// Name of the field being declared
        field: String,
        /// Validation message for the default
        message: String,
    },

    /// One or more problems were found while loading a kiosk file
    #[error("{count} error(s) detected while reading file '{}'", path.display())]
    LoadFailed {
        /// File that was being loaded
        path: PathBuf,
        /// Number of problems reported
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error points at a bug in the calling code rather than
    /// at bad user input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::UnknownField(_)
                | Self::DuplicateField(_)
                | Self::NotRedactable(_)
                | Self::Pattern(_)
                | Self::InvalidDefault { .. }
        )
    }
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, Error>;
