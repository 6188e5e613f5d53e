use async_trait::async_trait;
use liftlog_model::{AvatarUpdated, Identity};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::lock;
use crate::domains::profile::avatar::AvatarUpload;
use crate::domains::profile::form::ProfileUpdate;
use crate::infra::services::{ServiceResult, profile::ProfileService};

/// Scripted [`ProfileService`]
///
/// Results are handed out in the order they were queued. An empty queue
/// answers with success: no body for profile updates, `avatar.png` for
/// avatar uploads.
#[derive(Debug, Clone, Default)]
pub struct StubProfileService {
    inner: Arc<Mutex<Inner>>,
    gate: Option<Hold>,
}

#[derive(Debug, Default)]
struct Inner {
    profile_results: VecDeque<ServiceResult<Option<Identity>>>,
    avatar_results: VecDeque<ServiceResult<AvatarUpdated>>,
    profile_calls: Vec<ProfileUpdate>,
    avatar_calls: Vec<AvatarUpload>,
}

/// Lets a test park a call mid-flight
///
/// Permits are counted, so releases issued before a call parks are not
/// lost.
#[derive(Debug, Clone)]
struct Hold {
    entered: Arc<Semaphore>,
    release: Arc<Semaphore>,
}

impl Hold {
    fn new() -> Self {
        Self {
            entered: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        }
    }
}

async fn take(semaphore: &Semaphore) {
    if let Ok(permit) = semaphore.acquire().await {
        permit.forget();
    }
}

impl StubProfileService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits on [`release`](Self::release) before answering
    pub fn held() -> Self {
        Self {
            gate: Some(Hold::new()),
            ..Self::default()
        }
    }

    pub fn push_profile_result(
        &self,
        result: ServiceResult<Option<Identity>>,
    ) -> &Self {
        lock(&self.inner).profile_results.push_back(result);
        self
    }

    pub fn push_avatar_result(
        &self,
        result: ServiceResult<AvatarUpdated>,
    ) -> &Self {
        lock(&self.inner).avatar_results.push_back(result);
        self
    }

    pub fn profile_calls(&self) -> Vec<ProfileUpdate> {
        lock(&self.inner).profile_calls.clone()
    }

    pub fn avatar_calls(&self) -> Vec<AvatarUpload> {
        lock(&self.inner).avatar_calls.clone()
    }

    /// Resolves once a held call has been recorded
    pub async fn wait_entered(&self) {
        if let Some(hold) = &self.gate {
            take(&hold.entered).await;
        }
    }

    /// Let one held call finish
    pub fn release(&self) {
        if let Some(hold) = &self.gate {
            hold.release.add_permits(1);
        }
    }

    async fn park(&self) {
        if let Some(hold) = &self.gate {
            hold.entered.add_permits(1);
            take(&hold.release).await;
        }
    }
}

#[async_trait]
impl ProfileService for StubProfileService {
    async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ServiceResult<Option<Identity>> {
        lock(&self.inner).profile_calls.push(update.clone());
        self.park().await;
        lock(&self.inner)
            .profile_results
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn update_avatar(
        &self,
        upload: &AvatarUpload,
    ) -> ServiceResult<AvatarUpdated> {
        lock(&self.inner).avatar_calls.push(upload.clone());
        self.park().await;
        lock(&self.inner).avatar_results.pop_front().unwrap_or_else(|| {
            Ok(AvatarUpdated {
                avatar: "avatar.png".to_string(),
            })
        })
    }
}
