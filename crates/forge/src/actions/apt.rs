//! Package manager actions.
//!
//! Even with automatic updates disabled, a background package-index refresh
//! can hold the dpkg lock for a while after boot. Every apt action waits for
//! the lock to be released before running.

use crate::action::Action;
use crate::actions::external::External;
use crate::context::{ActionContext, Logger};
use crate::invoke::invoke;
use crate::types::ActionResult;
use crate::wait::{PollConfig, WaitCallback, poll_until};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lock files held by dpkg and apt while they work.
pub const LOCK_FILES: &[&str] = &["/var/lib/dpkg/lock-frontend", "/var/lib/dpkg/lock"];

/// Time between lock checks.
pub const LOCK_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Whether some process has `path` open.
///
/// A missing `lsof` counts as "not held".
fn lock_held(path: &Path) -> bool {
    invoke("lsof", [path]).is_ok_and(|result| result.is_success())
}

/// Reports each wait through the script logger.
struct LockWaitLog<'a> {
    logger: &'a dyn Logger,
}

impl WaitCallback for LockWaitLog<'_> {
    fn on_wait(&self, _attempt: u32, delay: Duration) {
        self.logger.write(&format!(
            "Waiting {} seconds for 'apt' lock...",
            delay.as_secs()
        ));
    }
}

/// A package manager command that first waits for the dpkg lock.
#[derive(Debug, Clone)]
pub struct AptAction {
    command: External,
    locks: Vec<PathBuf>,
    poll: PollConfig,
}

impl AptAction {
    /// Run `apt-get` with `args` once the lock is free.
    pub fn new<I, S>(title: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::wrap(External::new(title, "apt-get", args))
    }

    /// Run an arbitrary command once the lock is free.
    pub fn wrap(command: External) -> Self {
        Self {
            command,
            locks: LOCK_FILES.iter().map(PathBuf::from).collect(),
            poll: PollConfig::unbounded(LOCK_POLL_INTERVAL),
        }
    }

    /// Use different lock files.
    pub fn with_locks(mut self, locks: Vec<PathBuf>) -> Self {
        self.locks = locks;
        self
    }

    /// The wrapped command.
    pub fn command(&self) -> &External {
        &self.command
    }
}

impl Action for AptAction {
    fn title(&self) -> &str {
        self.command.title()
    }

    fn execute(&self, ctx: &ActionContext) -> Result<ActionResult> {
        let callback = LockWaitLog { logger: ctx.logger };
        let free = poll_until(&self.poll, Some(&callback), || {
            !self.locks.iter().any(|lock| lock_held(lock))
        });
        if !free {
            return Ok(ActionResult::failure("Timed out waiting for 'apt' lock"));
        }

        self.command.execute(ctx)
    }
}

fn with_packages(fixed: &[&str], packages: &[&str]) -> Vec<String> {
    fixed
        .iter()
        .chain(packages)
        .map(|s| (*s).to_string())
        .collect()
}

/// Install packages.
pub fn install(title: impl Into<String>, packages: &[&str]) -> AptAction {
    AptAction::new(title, with_packages(&["install", "-y"], packages))
}

/// Install packages without their recommended extras.
pub fn install_no_recommends(title: impl Into<String>, packages: &[&str]) -> AptAction {
    AptAction::new(
        title,
        with_packages(&["install", "-y", "--no-install-recommends"], packages),
    )
}

/// Remove packages together with their configuration.
pub fn purge(title: impl Into<String>, packages: &[&str]) -> AptAction {
    AptAction::new(
        title,
        with_packages(&["autoremove", "--purge", "-y"], packages),
    )
}

/// Refresh the package index.
pub fn update() -> AptAction {
    AptAction::new("Updating system package indices.", ["update"])
}

/// Upgrade all installed packages.
pub fn upgrade() -> AptAction {
    AptAction::new("Upgrading all installed packages.", ["dist-upgrade", "-y"])
}

/// Remove downloaded package files.
pub fn clean() -> AptAction {
    AptAction::new("Cleaning package cache.", ["clean"])
}
