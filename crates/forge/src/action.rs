//! Action trait for provisioning steps
//!
//! An Action is one discrete, loggable step of work that changes the system:
//! writing a file, installing a package, running a command.

use crate::context::ActionContext;
use crate::types::ActionResult;
use anyhow::Result;
use std::fmt;
use std::rc::Rc;

/// Core trait for provisioning steps
///
/// Actions must be safe to run again after an interrupted script is resumed:
/// either naturally idempotent ("install package") or guarded ("delete the
/// file if it exists").
///
/// # Example
///
/// ```ignore
/// use forge::{Action, ActionContext, ActionResult};
///
/// #[derive(Debug)]
/// struct Touch {
///     path: String,
/// }
///
/// impl Action for Touch {
///     fn title(&self) -> &str {
///         "Creating marker file"
///     }
///
///     fn execute(&self, _ctx: &ActionContext) -> anyhow::Result<ActionResult> {
///         std::fs::write(&self.path, "")?;
///         Ok(ActionResult::success())
///     }
/// }
/// ```
pub trait Action: fmt::Debug {
    /// Human-readable description, used only for logging
    fn title(&self) -> &str;

    /// Perform the step
    ///
    /// A non-zero status in the returned result is a failure. Errors
    /// returned through `Err` are treated the same way by the script, with
    /// the error message as output.
    fn execute(&self, ctx: &ActionContext) -> Result<ActionResult>;
}

/// A shared action handle; scripts compare handles by identity
pub type SharedAction = Rc<dyn Action>;

/// Whether two handles point at the same action instance
pub fn same_action(a: &SharedAction, b: &SharedAction) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
