//! Actions that run external programs.

use crate::action::Action;
use crate::context::ActionContext;
use crate::invoke::invoke;
use crate::types::ActionResult;
use anyhow::Result;

/// Run a program; its exit code becomes the result status.
#[derive(Debug, Clone)]
pub struct External {
    title: String,
    program: String,
    args: Vec<String>,
}

impl External {
    /// Create the action.
    pub fn new<I, S>(title: impl Into<String>, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The command line, for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Action for External {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        match invoke(&self.program, &self.args) {
            Ok(result) => Ok(result),
            Err(e) => Ok(ActionResult::failure(format!(
                "Unable to run '{}': {e}",
                self.command_line()
            ))),
        }
    }
}

/// Reboot the machine; usually the last step of a script.
pub fn reboot() -> External {
    External::new("Rebooting system NOW!", "reboot", std::iter::empty::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoLog;

    #[test]
    fn test_external_maps_exit_code() {
        let ctx = ActionContext::new(&NoLog);
        let ok = External::new("True", "sh", ["-c", "echo fine"]);
        assert_eq!(ok.execute(&ctx).unwrap(), ActionResult::new(0, "fine"));

        let bad = External::new("False", "sh", ["-c", "echo broken >&2; exit 7"]);
        assert_eq!(bad.execute(&ctx).unwrap(), ActionResult::new(7, "broken"));
    }

    #[test]
    fn test_missing_program_is_a_failing_result() {
        let ctx = ActionContext::new(&NoLog);
        let action = External::new("Missing", "no-such-program-kf", ["--flag"]);
        let result = action.execute(&ctx).unwrap();
        assert!(!result.is_success());
        assert!(result.output.contains("no-such-program-kf --flag"));
    }

    #[test]
    fn test_reboot_command() {
        let action = reboot();
        assert_eq!(action.title(), "Rebooting system NOW!");
        assert_eq!(action.command_line(), "reboot");
    }
}
