//! The authenticated identity as seen by the rest of the client
//!
//! [`SessionProjection`] is the only write path for the identity. Workflows
//! read a snapshot, compute a new value and hand it back; they never hold
//! a mutable reference to the shared record.

use async_trait::async_trait;
use liftlog_model::Identity;
use log::debug;
use tokio::sync::RwLock;

#[async_trait]
pub trait SessionProjection: Send + Sync {
    /// Snapshot of the signed-in user, if any
    async fn current_identity(&self) -> Option<Identity>;

    /// Replace the stored identity. Applying the same value twice leaves
    /// the session exactly as applying it once.
    async fn apply_identity_update(&self, identity: Identity);
}

/// In-memory session for the lifetime of the process
#[derive(Debug, Default)]
pub struct SessionStore {
    identity: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Forget the signed-in user
    pub async fn clear(&self) {
        *self.identity.write().await = None;
    }
}

#[async_trait]
impl SessionProjection for SessionStore {
    async fn current_identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    async fn apply_identity_update(&self, identity: Identity) {
        let mut slot = self.identity.write().await;
        if slot.as_ref() == Some(&identity) {
            debug!("[Session] Identity unchanged for user {}", identity.id);
            return;
        }
        debug!("[Session] Identity updated for user {}", identity.id);
        *slot = Some(identity);
    }
}
