/*!
 * User-facing notifications
 *
 * Notices such as "N files copied" or configuration errors are routed
 * through a [`Notifier`] passed in by the caller, so the core never writes
 * to the terminal directly.
 */

use std::cell::RefCell;

use strum::Display;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Sink for short messages shown to the user
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// Prints notices to stderr and mirrors them into the log
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    /// Suppress informational notices; errors are always shown
    pub quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => {
                log::debug!("notice: {}", message);
                if !self.quiet {
                    eprintln!("📋 {}", message);
                }
            }
            Severity::Error => {
                log::debug!("error notice: {}", message);
                eprintln!("⚠️ {}", message);
            }
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, oldest first
    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.notices.borrow().clone()
    }

    /// Messages of the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.notices.borrow_mut().push((severity, message.to_string()));
    }
}
