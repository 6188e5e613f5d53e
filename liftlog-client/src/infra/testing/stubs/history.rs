use async_trait::async_trait;
use liftlog_model::HistoryByDay;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::infra::services::{ServiceResult, history::HistoryService};

#[derive(Debug, Clone)]
pub struct StubHistoryService {
    result: ServiceResult<Vec<HistoryByDay>>,
    fetches: Arc<AtomicUsize>,
}

impl StubHistoryService {
    pub fn with_result(result: ServiceResult<Vec<HistoryByDay>>) -> Self {
        Self {
            result,
            fetches: Arc::default(),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryService for StubHistoryService {
    async fn fetch_history(&self) -> ServiceResult<Vec<HistoryByDay>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
