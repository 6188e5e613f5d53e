//! Profile update orchestrator
//!
//! One [`ProfileUpdater`] per profile screen. It runs two independent
//! operations, the text update (name and optional password rotation) and
//! the avatar replacement, each behind its own [`OperationGate`].
//!
//! For both operations the local check (validation or asset guard) runs
//! before any request, and the session is written only after the request
//! succeeded. The identity is then re-read and written back under a lock
//! shared by both operations, replacing only the operation's own field, so
//! a text update and an avatar update finishing in either order both
//! survive.
//!
//! Every remote failure ends here: it becomes exactly one notification and
//! an [`UpdateOutcome::Failed`]. Nothing is committed on failure.

use std::sync::Arc;

use liftlog_model::Identity;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::domains::auth::session::SessionProjection;
use crate::domains::profile::avatar::{self, AssetSource, GuardOutcome};
use crate::domains::profile::errors::ProfileError;
use crate::domains::profile::form::{ProfileFormState, ProfileUpdate};
use crate::domains::profile::state_types::{
    OperationGate, OperationPhase, UpdateOutcome,
};
use crate::domains::profile::validation::validate_profile;
use crate::domains::ui::feedback::{NotificationSink, ToastNotification};
use crate::infra::services::profile::ProfileService;

pub const PROFILE_UPDATED: &str = "User was updated successfully!";
pub const PROFILE_UPDATE_FALLBACK: &str =
    "It's not possible to update the user at the moment. \
    Please try again later!";
pub const AVATAR_UPDATED: &str =
    "Your profile photo has been successfully updated!";
pub const AVATAR_UPDATE_FALLBACK: &str =
    "It's not possible to update the profile photo at the moment. \
    Please try again later!";
pub const SESSION_EXPIRED: &str =
    "Your session has expired, please sign in again!";

pub struct ProfileUpdater {
    session: Arc<dyn SessionProjection>,
    service: Arc<dyn ProfileService>,
    assets: Arc<dyn AssetSource>,
    notifier: Arc<dyn NotificationSink>,
    profile_gate: OperationGate,
    avatar_gate: OperationGate,
    /// Held from the re-read through the write in `commit`
    commit_lock: Mutex<()>,
}

impl std::fmt::Debug for ProfileUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileUpdater")
            .field("profile_phase", &self.profile_phase())
            .field("avatar_phase", &self.avatar_phase())
            .finish()
    }
}

impl ProfileUpdater {
    pub fn new(
        session: Arc<dyn SessionProjection>,
        service: Arc<dyn ProfileService>,
        assets: Arc<dyn AssetSource>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            session,
            service,
            assets,
            notifier,
            profile_gate: OperationGate::new("profile"),
            avatar_gate: OperationGate::new("avatar"),
            commit_lock: Mutex::new(()),
        }
    }

    /// `Submitting` while a text update is in flight; disable the button
    pub fn profile_phase(&self) -> OperationPhase {
        self.profile_gate.phase()
    }

    /// `Submitting` while an avatar replacement is in flight
    pub fn avatar_phase(&self) -> OperationPhase {
        self.avatar_gate.phase()
    }

    /// Validate and submit the profile form
    pub async fn submit_profile(
        &self,
        form: &ProfileFormState,
    ) -> UpdateOutcome {
        let Some(_guard) = self.profile_gate.try_begin() else {
            debug!("[Profile] Update already in flight, ignoring submit");
            return UpdateOutcome::Busy;
        };

        let validation = validate_profile(form);
        if !validation.is_valid() {
            debug!(
                "[Profile] Form has {} invalid field(s), not submitting",
                validation.len()
            );
            return UpdateOutcome::Invalid(validation);
        }

        if self.session.current_identity().await.is_none() {
            return self.fail_unauthenticated();
        }

        let update = ProfileUpdate::from_form(form);
        info!(
            "[Profile] Submitting update (password rotation: {})",
            update.password_change.is_some()
        );

        let returned = match self.service.update_profile(&update).await {
            Ok(returned) => returned,
            Err(err) => {
                warn!("[Profile] Update failed: {}", err);
                self.notifier.notify(ToastNotification::error(
                    err.user_message(PROFILE_UPDATE_FALLBACK),
                ));
                return UpdateOutcome::Failed(err.into());
            }
        };

        let name = returned
            .map(|identity| identity.name)
            .unwrap_or_else(|| update.name.clone());

        self.commit(|current| current.with_name(name), PROFILE_UPDATED)
            .await
    }

    /// Let the user pick a new photo and upload it
    pub async fn replace_avatar(&self) -> UpdateOutcome {
        let Some(_guard) = self.avatar_gate.try_begin() else {
            debug!("[Avatar] Replacement already in flight, ignoring");
            return UpdateOutcome::Busy;
        };

        let Some(identity) = self.session.current_identity().await else {
            return self.fail_unauthenticated();
        };

        let upload =
            match avatar::select_avatar(self.assets.as_ref(), &identity.name)
                .await
            {
                Ok(GuardOutcome::Accepted(upload)) => upload,
                Ok(GuardOutcome::Cancelled) => return UpdateOutcome::Cancelled,
                Err(policy) => {
                    warn!("[Avatar] Asset refused: {:?}", policy);
                    self.notifier
                        .notify(ToastNotification::error(policy.to_string()));
                    return UpdateOutcome::Failed(policy.into());
                }
            };

        info!(
            "[Avatar] Uploading {} ({}, {} bytes)",
            upload.file_name, upload.mime_type, upload.byte_size
        );

        match self.service.update_avatar(&upload).await {
            Ok(updated) => {
                self.commit(
                    |current| current.with_avatar(updated.avatar),
                    AVATAR_UPDATED,
                )
                .await
            }
            Err(err) => {
                warn!("[Avatar] Upload failed: {}", err);
                self.notifier.notify(ToastNotification::error(
                    err.user_message(AVATAR_UPDATE_FALLBACK),
                ));
                UpdateOutcome::Failed(err.into())
            }
        }
    }

    /// Apply `change` to the freshest identity and confirm to the user
    async fn commit(
        &self,
        change: impl FnOnce(&Identity) -> Identity,
        confirmation: &'static str,
    ) -> UpdateOutcome {
        let _commit = self.commit_lock.lock().await;
        let Some(current) = self.session.current_identity().await else {
            warn!("[Profile] Session ended while the update was in flight");
            return self.fail_unauthenticated();
        };

        let updated = change(&current);
        self.session.apply_identity_update(updated.clone()).await;
        self.notifier.notify(ToastNotification::success(confirmation));
        UpdateOutcome::Updated(updated)
    }

    fn fail_unauthenticated(&self) -> UpdateOutcome {
        self.notifier
            .notify(ToastNotification::error(SESSION_EXPIRED));
        UpdateOutcome::Failed(ProfileError::NotAuthenticated)
    }
}
