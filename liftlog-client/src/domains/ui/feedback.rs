//! Transient success and error messages shown to the user
//!
//! Workflows hand a [`ToastNotification`] to a [`NotificationSink`] and
//! move on; sinks must not block.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastNotification {
    pub title: String,
    pub kind: ToastKind,
}

impl ToastNotification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ToastKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

/// Fire-and-forget message display
pub trait NotificationSink: Send + Sync {
    fn notify(&self, toast: ToastNotification);

    /// Drop any toasts still on screen
    fn dismiss_all(&self) {}
}
