//! # Forge
//!
//! A resumable, sequential provisioning engine.
//!
//! ## Core Concepts
//!
//! - **Action**: One step of system-changing work (write a file, install a package)
//! - **ActionResult**: Exit status plus diagnostic output of a step
//! - **Script**: An ordered list of actions, run from a 1-based resume step
//! - **Logger**: Where the script reports progress and errors
//!
//! A script stops at the first failing step and logs its index and the
//! elapsed time. Running the same script again with that index as the resume
//! step continues where it left off, which is how provisioning survives the
//! reboots it triggers itself.
//!
//! ## Example
//!
//! ```no_run
//! use forge::actions::{self, CreateText, External};
//! use forge::{MemoryLog, Script};
//!
//! let log = MemoryLog::new();
//! let mut script = Script::new(&log, 1);
//! script.add(CreateText::new("Writing motd", "/etc/motd", "Kiosk\n"))?;
//! script.add(actions::apt::update())?;
//! script.add(External::new("Enabling NTP", "timedatectl", ["set-ntp", "on"]))?;
//!
//! let result = script.execute()?;
//! assert!(result.is_success());
//! # Ok::<(), forge::ScriptError>(())
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod actions;
pub mod context;
pub mod error;
pub mod invoke;
pub mod script;
pub mod types;
pub mod users;
pub mod wait;

// Re-export main types at crate root
pub use action::{Action, SharedAction};
pub use context::{ActionContext, Level, Logger, MemoryLog, NoLog};
pub use error::ScriptError;
pub use invoke::invoke;
pub use script::{Script, format_elapsed};
pub use types::ActionResult;
pub use wait::{PollConfig, WaitCallback, poll_until};
