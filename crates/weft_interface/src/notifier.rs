//! User-visible error reporting.

/// Surfaces failures to the person looking at the table.
pub trait Notifier: Send + Sync {
    /// Show an error message.
    fn notify_error(&self, message: &str);
}

/// Notifier that reports through the tracing subscriber.
///
/// Suitable for command-line hosts where stderr is the user's screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!(reason = %message, "Load failed");
    }
}
