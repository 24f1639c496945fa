use super::policy::Severity;

/// Best-effort alert display.
///
/// Implementations must not block the monitor cadence. The returned flag
/// only says whether the notification was handed off; whatever happens to it
/// afterwards is not observed by the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, severity: Severity) -> bool;
}

/// Drops every notification. Used with `--no-notify`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _message: &str, _severity: Severity) -> bool {
        false
    }
}
