use async_trait::async_trait;
use liftlog_model::HistoryByDay;
use std::sync::Arc;

use crate::infra::{
    api_client::ApiClient, constants::routes, services::ServiceResult,
};

#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Exercise history, one section per day, newest first as sent
    async fn fetch_history(&self) -> ServiceResult<Vec<HistoryByDay>>;
}

#[derive(Debug, Clone)]
pub struct HistoryApiAdapter {
    client: Arc<ApiClient>,
}

impl HistoryApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HistoryService for HistoryApiAdapter {
    async fn fetch_history(&self) -> ServiceResult<Vec<HistoryByDay>> {
        Ok(self.client.get(routes::history::LIST).await?)
    }
}
