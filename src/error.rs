//! Application error kinds and how they are shown to the user.

use std::any::Any;
use thiserror::Error;

/// Errors raised by the commands themselves.
#[derive(Debug, Error)]
pub enum AppError {
    /// The command was invoked with arguments it cannot work with
    #[error("{0}")]
    Usage(String),

    /// The machine or the kiosk file is not in a state we can work with
    #[error("{0}")]
    Kiosk(String),

    /// A bug in this program
    #[error("{0}")]
    Internal(String),
}

/// Turn any error into the single line shown to the user.
pub fn describe(err: &anyhow::Error) -> String {
    if let Some(app) = err.downcast_ref::<AppError>() {
        return match app {
            AppError::Usage(msg) => format!("Syntax: {msg}"),
            AppError::Kiosk(msg) => format!("Error: {msg}"),
            AppError::Internal(msg) => format!("Internal error: {msg}"),
        };
    }

    if let Some(fields_err) = err.downcast_ref::<fields::Error>() {
        if fields_err.is_internal() {
            return format!("Internal error: {fields_err}");
        }
        return format!("Error: {fields_err}");
    }

    if let Some(script_err) = err.downcast_ref::<forge::ScriptError>() {
        return format!("Internal error: {script_err}");
    }

    format!("Error: {err:#}")
}

/// The line shown when the program panics.
pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unexpected failure");
    format!("Internal error: {message}")
}
