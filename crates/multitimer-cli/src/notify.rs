//! Desktop notification sink.

use multitimer_core::Notifier;
use notify_rust::Notification;

/// Sends timer transitions to the desktop notification daemon.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(e) = Notification::new().summary(title).body(body).show() {
            tracing::warn!("failed to send desktop notification: {e}");
        }
    }
}
