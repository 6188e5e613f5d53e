//! Wiring of the client: one API client and one session shared by every
//! workflow.

pub mod cli;

use std::sync::Arc;

use log::info;

use crate::domains::auth::flows::AccountFlows;
use crate::domains::auth::session::{SessionProjection, SessionStore};
use crate::domains::history::HistoryLoader;
use crate::domains::profile::avatar::{self, AssetSource};
use crate::domains::profile::update::ProfileUpdater;
use crate::domains::ui::feedback::{NotificationSink, ToastNotification};
use crate::infra::api_client::{ApiClient, ApiResult};
use crate::infra::config::Config;
use crate::infra::services::{
    AccountApiAdapter, HistoryApiAdapter, ProfileApiAdapter, SessionApiAdapter,
};

pub struct App {
    config: Config,
    client: Arc<ApiClient>,
    session: Arc<SessionStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        config: Config,
        notifier: Arc<dyn NotificationSink>,
    ) -> ApiResult<Self> {
        let client = Arc::new(ApiClient::new(
            &config.server_url,
            config.request_timeout(),
        )?);
        info!("[App] Using server {}", client.base_url());

        Ok(Self {
            config,
            client,
            session: Arc::new(SessionStore::new()),
            notifier,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Forget the signed-in user and the token
    pub async fn sign_out(&self) {
        self.session.clear().await;
        self.client.set_token(None).await;
        info!("[App] Signed out");
    }

    pub fn account_flows(&self) -> AccountFlows {
        AccountFlows::new(
            Arc::new(SessionApiAdapter::new(self.client.clone())),
            Arc::new(AccountApiAdapter::new(self.client.clone())),
            self.session.clone(),
            self.notifier.clone(),
        )
    }

    pub fn profile_updater(
        &self,
        assets: Arc<dyn AssetSource>,
    ) -> ProfileUpdater {
        ProfileUpdater::new(
            self.session.clone(),
            Arc::new(ProfileApiAdapter::new(self.client.clone())),
            assets,
            self.notifier.clone(),
        )
    }

    pub fn history_loader(&self) -> HistoryLoader {
        HistoryLoader::new(
            Arc::new(HistoryApiAdapter::new(self.client.clone())),
            self.notifier.clone(),
        )
    }

    /// Resolved avatar URL for the signed-in user
    pub async fn avatar_url(&self) -> Option<String> {
        let identity = self.session.current_identity().await?;
        avatar::avatar_url(self.client.base_url(), &identity)
    }
}

/// Prints toasts to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, toast: ToastNotification) {
        if toast.is_error() {
            eprintln!("error: {}", toast.title);
        } else {
            println!("{}", toast.title);
        }
    }
}
