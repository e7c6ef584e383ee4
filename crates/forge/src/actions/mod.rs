//! Concrete provisioning steps.

pub mod apt;
pub mod external;
pub mod file;

pub use apt::AptAction;
pub use external::{External, reboot};
pub use file::{
    AppendText, CreateOwnedText, CreateText, DeleteFile, RemoveFolder, ReplaceText, TryDeleteFile,
};
