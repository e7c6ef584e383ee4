//! # fields
//!
//! Typed, self-describing configuration fields.
//!
//! This crate provides:
//! - [`Field`]: a named value with a validation rule ([`FieldKind`]) and help text
//! - [`Fields`]: an ordered set of fields with load, save, assign and redact
//! - A flat `name=value` file format that documents every field inline
//!
//! ## Example
//!
//! ```no_run
//! use fields::{Field, FieldKind, Fields, Version};
//! use std::path::Path;
//!
//! let mut fields = Fields::new(Version::new("KioskForge", "kioskforge", "1.0"));
//! fields.add(Field::new("swap_size", "4", FieldKind::natural(0, 128), "Swap file size in GB.")?)?;
//! fields.add(Field::new("mouse", "false", FieldKind::Boolean, "Enable the mouse.")?)?;
//!
//! for error in fields.load(Path::new("my.kiosk")) {
//!     eprintln!("{error}");
//! }
//!
//! fields.assign("swap_size", "8")?;
//! fields.save(Path::new("my.kiosk"))?;
//! # Ok::<(), fields::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod reader;
pub mod set;
pub mod version;
pub mod writer;

pub use error::{Error, FieldError, Result, TextFileError};
pub use field::{Field, FieldKind, FieldValue, PASSWORD_MAX_LEN, REDACTED};
pub use reader::LoadPolicy;
pub use set::Fields;
pub use version::Version;
