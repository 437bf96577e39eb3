//! Business-rule notifications collected during one unit of work.
//!
//! Validation and business code report recoverable failures here instead of
//! returning errors; the presentation layer reads the collected messages when
//! it decides how to respond. A [`Notifier`] lives exactly as long as the
//! request that created it.

/// A single human-readable business or validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Per-request notification collector.
///
/// Messages accumulate in arrival order and are never removed within the
/// unit of work. Construct one at the top of each request handler and thread
/// it through the call chain; it is dropped with the request.
#[derive(Debug, Default)]
pub struct Notifier {
    notifications: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification. Safe to call any number of times.
    pub fn handle(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Shorthand for [`handle`](Self::handle) with a bare message.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.handle(Notification::new(message));
    }

    /// All notifications collected so far, in arrival order.
    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn has_any(&self) -> bool {
        !self.notifications.is_empty()
    }
}
