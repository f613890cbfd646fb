use crate::domain::ports::{Notification, NotificationVariant, Notifier};
use std::io::Write;

/// Writes toast-style notifications to stderr.
#[derive(Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn write_to(writer: &mut impl Write, notification: &Notification) -> std::io::Result<()> {
        let prefix = match notification.variant {
            NotificationVariant::Info => "--",
            NotificationVariant::Success => "ok",
            NotificationVariant::Destructive => "!!",
        };
        writeln!(
            writer,
            "[{prefix}] {}: {}",
            notification.title, notification.description
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        // A notification that cannot be written is dropped, not fatal.
        let _ = Self::write_to(&mut std::io::stderr(), &notification);
    }
}
