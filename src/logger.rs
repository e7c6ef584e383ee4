//! Console and system log output for provisioning progress.

use colored::Colorize;
use forge::Logger;
use std::ffi::CString;

/// Open connection to the system log, closed on drop.
pub struct Syslog {
    // openlog() keeps the pointer, so the string must live as long as we do
    _ident: CString,
}

impl Syslog {
    /// Open the system log under `ident`.
    pub fn open(ident: &str) -> anyhow::Result<Self> {
        let ident = CString::new(ident)?;
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, libc::LOG_LOCAL0);
        }
        Ok(Self { _ident: ident })
    }

    /// Send one line at `priority`.
    pub fn send(&self, priority: libc::c_int, line: &str) {
        // Lines with interior NULs cannot be passed to syslog; drop them
        let Ok(line) = CString::new(line) else {
            return;
        };
        unsafe {
            libc::syslog(priority, c"%s".as_ptr(), line.as_ptr());
        }
    }
}

impl Drop for Syslog {
    fn drop(&mut self) {
        unsafe {
            libc::closelog();
        }
    }
}

/// Logger writing to the console and, optionally, the system log.
pub struct SystemLogger {
    syslog: Option<Syslog>,
}

impl SystemLogger {
    /// Console only.
    pub fn console() -> Self {
        Self { syslog: None }
    }

    /// Console plus the system log under `ident`.
    ///
    /// Falls back to console only if the system log cannot be opened.
    pub fn with_syslog(ident: &str) -> Self {
        match Syslog::open(ident) {
            Ok(syslog) => Self {
                syslog: Some(syslog),
            },
            Err(e) => {
                log::warn!("System log unavailable: {e}");
                Self::console()
            }
        }
    }

    fn emit(&self, priority: libc::c_int, text: &str, print: impl Fn(&str)) {
        if text.is_empty() {
            print("");
            return;
        }
        for line in text.lines() {
            print(line);
            if let Some(syslog) = &self.syslog {
                syslog.send(priority, line);
            }
        }
    }
}

impl Logger for SystemLogger {
    fn write(&self, text: &str) {
        self.emit(libc::LOG_INFO, text, |line| println!("{line}"));
    }

    fn error(&self, text: &str) {
        self.emit(libc::LOG_ERR, text, |line| eprintln!("{}", line.red()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_accepts_any_text() {
        let logger = SystemLogger::console();
        logger.write("");
        logger.write("one\ntwo");
        logger.error("three");
    }

    #[test]
    fn test_syslog_open_and_close() {
        let syslog = Syslog::open("kioskforge-test").unwrap();
        syslog.send(libc::LOG_DEBUG, "test line");
        syslog.send(libc::LOG_DEBUG, "bad\0line");
        drop(syslog);
    }

    #[test]
    fn test_syslog_rejects_bad_ident() {
        assert!(Syslog::open("bad\0ident").is_err());
    }
}
