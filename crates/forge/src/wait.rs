//! Fixed-interval polling for conditions outside our control.

use std::thread;
use std::time::Duration;

/// Callback trait for wait notifications.
pub trait WaitCallback {
    /// Called before sleeping because the condition is not met yet.
    ///
    /// # Arguments
    /// * `attempt` - Number of checks made so far (1-indexed)
    /// * `delay` - Time until the next check
    fn on_wait(&self, attempt: u32, delay: Duration);
}

/// Polling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Time between checks
    pub interval: Duration,
    /// Give up after this many checks; `None` waits forever
    pub max_attempts: Option<u32>,
}

impl PollConfig {
    /// Poll forever at `interval`.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Poll at most `max_attempts` times at `interval`.
    pub fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }
}

/// Check `ready` until it returns true, sleeping between checks.
///
/// Returns false if the attempts ran out first.
pub fn poll_until<F>(config: &PollConfig, callback: Option<&dyn WaitCallback>, mut ready: F) -> bool
where
    F: FnMut() -> bool,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        if ready() {
            return true;
        }
        if config.max_attempts.is_some_and(|max| attempt >= max) {
            return false;
        }

        if let Some(cb) = callback {
            cb.on_wait(attempt, config.interval);
        }
        thread::sleep(config.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_ready_immediately() {
        let config = PollConfig::bounded(Duration::from_millis(1), 3);
        assert!(poll_until(&config, None, || true));
    }

    #[test]
    fn test_eventually_ready() {
        let config = PollConfig::unbounded(Duration::from_millis(1));
        let checks = Rc::new(Cell::new(0));
        let checks_clone = checks.clone();

        let ready = poll_until(&config, None, || {
            checks_clone.set(checks_clone.get() + 1);
            checks_clone.get() == 4
        });

        assert!(ready);
        assert_eq!(checks.get(), 4);
    }

    #[test]
    fn test_gives_up() {
        let config = PollConfig::bounded(Duration::from_millis(1), 3);
        let checks = Rc::new(Cell::new(0));
        let checks_clone = checks.clone();

        let ready = poll_until(&config, None, || {
            checks_clone.set(checks_clone.get() + 1);
            false
        });

        assert!(!ready);
        assert_eq!(checks.get(), 3);
    }

    #[test]
    fn test_callback_invoked_between_checks() {
        struct CountingCallback(Cell<u32>);
        impl WaitCallback for CountingCallback {
            fn on_wait(&self, _: u32, _: Duration) {
                self.0.set(self.0.get() + 1);
            }
        }

        let config = PollConfig::bounded(Duration::from_millis(1), 3);
        let callback = CountingCallback(Cell::new(0));
        poll_until(&config, Some(&callback), || false);

        // Not called after the final check
        assert_eq!(callback.0.get(), 2);
    }
}
