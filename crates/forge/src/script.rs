//! Resumable sequential executor

use crate::action::{Action, SharedAction, same_action};
use crate::context::{ActionContext, Logger};
use crate::error::{Result, ScriptError};
use crate::types::ActionResult;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// An ordered list of actions, run from a 1-based resume step.
///
/// Scripts stop at the first failing action. A run interrupted by a reboot
/// (or a failure that has since been fixed) is continued by building the
/// same script again with `resume` pointing at the step to redo.
pub struct Script<'a> {
    logger: &'a dyn Logger,
    resume: usize,
    actions: Vec<SharedAction>,
}

impl<'a> Script<'a> {
    /// Create an empty script that starts at step `resume`.
    pub fn new(logger: &'a dyn Logger, resume: usize) -> Self {
        Self {
            logger,
            resume,
            actions: Vec::new(),
        }
    }

    /// Append a shared action; the same instance can only be added once.
    pub fn append(&mut self, action: SharedAction) -> Result<()> {
        if self.actions.iter().any(|a| same_action(a, &action)) {
            return Err(ScriptError::DuplicateAction {
                title: action.title().to_string(),
            });
        }
        self.actions.push(action);
        Ok(())
    }

    /// Append a new action and return its handle.
    pub fn add<A: Action + 'static>(&mut self, action: A) -> Result<SharedAction> {
        let action: SharedAction = Rc::new(action);
        self.append(Rc::clone(&action))?;
        Ok(action)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the script has no steps.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The 1-based step execution starts at.
    pub fn resume(&self) -> usize {
        self.resume
    }

    /// Step titles in execution order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.title())
    }

    /// Run the script from the resume step.
    ///
    /// Fails without running anything when the resume step is out of range.
    /// Otherwise returns the result of the last action run: the first failing
    /// one, or the final one if everything succeeded.
    pub fn execute(self) -> Result<ActionResult> {
        let count = self.actions.len();
        if self.resume < 1 || self.resume > count {
            return Err(ScriptError::ResumeOutOfRange {
                resume: self.resume,
                count,
            });
        }

        let ctx = ActionContext::new(self.logger);
        let start = Instant::now();
        let mut result = ActionResult::success();

        log::debug!("Executing {} of {} steps", count - self.resume + 1, count);
        self.logger.write("STEP ELAPSED  ACTION");

        for (offset, action) in self.actions.iter().enumerate().skip(self.resume - 1) {
            let index = offset + 1;
            let elapsed = format_elapsed(start.elapsed());
            self.logger
                .write(&format!("{index:4} {elapsed} {}", action.title()));

            result = match action.execute(&ctx) {
                Ok(result) => result,
                Err(e) => ActionResult::failure(format!("{e:#}")),
            };

            if !result.is_success() {
                if !result.output.is_empty() {
                    self.logger.error(&result.output);
                }
                self.logger.error(&format!(
                    "*** SCRIPT ABORTED AT STEP {index} ({}) DUE TO ABOVE ERROR",
                    format_elapsed(start.elapsed())
                ));
                return Ok(result);
            }
        }

        self.logger.write(&format!(
            "{:4} {} FORGE PROCESS FINISHED",
            count + 1,
            format_elapsed(start.elapsed())
        ));
        Ok(result)
    }
}

/// Format a duration as `HH:MM:SS`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
