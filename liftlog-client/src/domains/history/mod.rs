//! Exercise history screen

use std::sync::Arc;

use liftlog_model::HistoryByDay;
use log::{debug, warn};

use crate::domains::ui::feedback::{NotificationSink, ToastNotification};
use crate::infra::services::history::HistoryService;

pub const HISTORY_LOAD_FALLBACK: &str = "Unable to load the exercise history.";
pub const EMPTY_HISTORY_MESSAGE: &str = "There is no exercise history recorded \
    yet!\nHow about we get started with some exercise?";

/// What the history list renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryView {
    pub sections: Vec<HistoryByDay>,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(HistoryByDay::is_empty)
    }

    /// Text for the empty list, if the list is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_HISTORY_MESSAGE)
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(HistoryByDay::len).sum()
    }
}

pub struct HistoryLoader {
    service: Arc<dyn HistoryService>,
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for HistoryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLoader").finish_non_exhaustive()
    }
}

impl HistoryLoader {
    pub fn new(
        service: Arc<dyn HistoryService>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self { service, notifier }
    }

    /// Fetch the history. A failure is reported once and yields an empty
    /// view.
    pub async fn load(&self) -> HistoryView {
        match self.service.fetch_history().await {
            Ok(sections) => {
                let view = HistoryView { sections };
                debug!("[History] Loaded {} entries", view.entry_count());
                view
            }
            Err(err) => {
                warn!("[History] Load failed: {}", err);
                self.notifier.notify(ToastNotification::error(
                    err.user_message(HISTORY_LOAD_FALLBACK),
                ));
                HistoryView::default()
            }
        }
    }
}
