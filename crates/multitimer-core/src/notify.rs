//! Notification sink seam.

/// Fire-and-forget notification delivery.
///
/// Implementations must not block for long and must swallow their own
/// failures (logging them at most); the timer engine never learns whether
/// a notification made it to the screen.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Discards every notification. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
