use std::sync::{Arc, Mutex};

use super::lock;
use crate::domains::ui::feedback::{
    NotificationSink, ToastKind, ToastNotification,
};

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    toasts: Vec<ToastNotification>,
    dismissals: usize,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<ToastNotification> {
        lock(&self.inner).toasts.clone()
    }

    pub fn titles(&self, kind: ToastKind) -> Vec<String> {
        lock(&self.inner)
            .toasts
            .iter()
            .filter(|toast| toast.kind == kind)
            .map(|toast| toast.title.clone())
            .collect()
    }

    pub fn dismissals(&self) -> usize {
        lock(&self.inner).dismissals
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, toast: ToastNotification) {
        lock(&self.inner).toasts.push(toast);
    }

    fn dismiss_all(&self) {
        lock(&self.inner).dismissals += 1;
    }
}
