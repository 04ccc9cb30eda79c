//! Notification channel abstraction

use crate::types::Severity;

/// Displays a user-facing message
///
/// Platform implementations:
/// - Terminal front-end: `ToastQueue` (transient toasts with expiry)
/// - Headless / tests: [`LogNotifier`]
///
/// Messages are already localized by the caller.
pub trait Notifier: Send + Sync {
    /// Show `message` with the given severity
    fn display(&self, severity: Severity, message: &str);
}

/// Notifier that forwards every message to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn display(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => log::info!("[{}] {message}", severity.label()),
            Severity::Warn => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}
