//! Profile and avatar update workflows against stubbed collaborators

use std::sync::Arc;
use std::time::Duration;

use liftlog_client::common::validation::FormField;
use liftlog_client::domains::auth::session::{SessionProjection, SessionStore};
use liftlog_client::domains::profile::errors::{AssetPolicyError, ProfileError};
use liftlog_client::domains::profile::form::ProfileFormState;
use liftlog_client::domains::profile::state_types::{
    OperationPhase, UpdateOutcome,
};
use liftlog_client::domains::profile::update::{
    AVATAR_UPDATE_FALLBACK, AVATAR_UPDATED, PROFILE_UPDATE_FALLBACK,
    PROFILE_UPDATED, ProfileUpdater, SESSION_EXPIRED,
};
use liftlog_client::domains::profile::MAX_AVATAR_BYTES;
use liftlog_client::domains::profile::validation::CONFIRM_MISMATCH;
use liftlog_client::domains::ui::feedback::ToastKind;
use liftlog_client::infra::services::ServiceError;
use liftlog_client::infra::testing::{
    RecordingNotifier, StubAssetSource, StubProfileService, identity,
};
use liftlog_model::{AvatarUpdated, Identity};

const MIB: u64 = 1024 * 1024;

struct Harness {
    updater: Arc<ProfileUpdater>,
    session: Arc<SessionStore>,
    service: StubProfileService,
    notifier: RecordingNotifier,
}

fn signed_in(user: Identity) -> Arc<SessionStore> {
    Arc::new(SessionStore::with_identity(user))
}

fn harness_with(
    session: Arc<SessionStore>,
    service: StubProfileService,
    assets: StubAssetSource,
) -> Harness {
    let notifier = RecordingNotifier::new();
    let updater = Arc::new(ProfileUpdater::new(
        session.clone(),
        Arc::new(service.clone()),
        Arc::new(assets),
        Arc::new(notifier.clone()),
    ));
    Harness {
        updater,
        session,
        service,
        notifier,
    }
}

fn harness(user: Identity) -> Harness {
    harness_with(
        signed_in(user),
        StubProfileService::new(),
        StubAssetSource::selecting("file:///photos/me.jpg", MIB),
    )
}

fn with_avatar(mut user: Identity, avatar: &str) -> Identity {
    user.avatar = Some(avatar.to_string());
    user
}

#[tokio::test]
async fn scenario_a_name_update_touches_only_the_name() {
    let before = with_avatar(identity("Alexander"), "old.png");
    let h = harness(before.clone());
    let form = ProfileFormState::for_identity(&before).with_name("Alex");

    let outcome = h.updater.submit_profile(&form).await;

    let current = h.session.current_identity().await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(current.clone()));
    assert_eq!(current.name, "Alex");
    assert_eq!(current.email, before.email);
    assert_eq!(current.avatar, before.avatar);

    let calls = h.service.profile_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "Alex");
    assert!(calls[0].password_change.is_none());
    assert_eq!(
        h.notifier.titles(ToastKind::Success),
        vec![PROFILE_UPDATED.to_string()]
    );
    assert_eq!(h.updater.profile_phase(), OperationPhase::Idle);
}

#[tokio::test]
async fn server_returned_name_wins_over_submitted_one() {
    let before = identity("Alex");
    let h = harness(before.clone());
    h.service
        .push_profile_result(Ok(Some(before.with_name("Alex D."))));

    let form = ProfileFormState::for_identity(&before).with_name("Alex  ");
    h.updater.submit_profile(&form).await;

    assert_eq!(h.service.profile_calls()[0].name, "Alex");
    assert_eq!(h.session.current_identity().await.unwrap().name, "Alex D.");
}

#[tokio::test]
async fn scenario_b_short_password_blocks_submission() {
    let before = identity("Alex");
    let h = harness(before.clone());
    let form = ProfileFormState::for_identity(&before)
        .with_password_rotation("current1", "abc", "abc");

    let outcome = h.updater.submit_profile(&form).await;

    let UpdateOutcome::Invalid(result) = outcome else {
        panic!("expected validation failure, got {outcome:?}");
    };
    assert!(result.has_error(FormField::NewPassword));
    assert!(h.service.profile_calls().is_empty());
    assert!(h.notifier.toasts().is_empty());
    assert_eq!(h.session.current_identity().await, Some(before));
}

#[tokio::test]
async fn scenario_c_mismatched_confirmation_is_reported() {
    let before = identity("Alex");
    let h = harness(before.clone());
    let form = ProfileFormState::for_identity(&before)
        .with_password_rotation("current1", "abcdef", "abcdez");

    let UpdateOutcome::Invalid(result) = h.updater.submit_profile(&form).await
    else {
        panic!("expected validation failure");
    };
    assert_eq!(
        result.error(FormField::ConfirmPassword),
        Some(CONFIRM_MISMATCH)
    );
    assert!(h.service.profile_calls().is_empty());
}

#[tokio::test]
async fn password_rotation_is_sent_with_the_old_password() {
    let before = identity("Alex");
    let h = harness(before.clone());
    let form = ProfileFormState::for_identity(&before)
        .with_password_rotation("current1", "abcdef", "abcdef");

    assert!(h.updater.submit_profile(&form).await.is_updated());

    let request = h.service.profile_calls()[0].to_request();
    assert_eq!(request.old_password.as_deref(), Some("current1"));
    assert_eq!(request.password.as_deref(), Some("abcdef"));
}

#[tokio::test]
async fn scenario_d_oversized_avatar_is_never_uploaded() {
    let before = with_avatar(identity("Alex"), "old.png");
    let h = harness_with(
        signed_in(before.clone()),
        StubProfileService::new(),
        StubAssetSource::selecting("file:///photos/huge.jpg", 6 * MIB),
    );

    let outcome = h.updater.replace_avatar().await;

    assert!(matches!(
        outcome,
        UpdateOutcome::Failed(ProfileError::AssetPolicy(
            AssetPolicyError::Oversized { .. }
        ))
    ));
    assert!(h.service.avatar_calls().is_empty());
    assert_eq!(
        h.notifier.titles(ToastKind::Error),
        vec![
            "The selected image is oversized, please choose another one \
             (max 5Mb)!"
                .to_string()
        ]
    );
    assert_eq!(h.session.current_identity().await, Some(before));
}

#[tokio::test]
async fn scenario_e_application_error_is_shown_verbatim() {
    let before = identity("Alex");
    let h = harness(before.clone());
    h.service.push_profile_result(Err(ServiceError::Application(
        "wrong old password".into(),
    )));
    let form = ProfileFormState::for_identity(&before)
        .with_name("Alexandra")
        .with_password_rotation("nope12", "abcdef", "abcdef");

    let outcome = h.updater.submit_profile(&form).await;

    assert!(matches!(
        outcome,
        UpdateOutcome::Failed(ProfileError::Service(
            ServiceError::Application(_)
        ))
    ));
    assert_eq!(
        h.notifier
            .toasts()
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>(),
        vec!["wrong old password"]
    );
    assert_eq!(h.session.current_identity().await, Some(before));
    assert_eq!(h.updater.profile_phase(), OperationPhase::Idle);
}

#[tokio::test]
async fn unclassified_failure_uses_fallback_message() {
    let before = identity("Alex");
    let h = harness(before.clone());
    h.service
        .push_profile_result(Err(ServiceError::Unclassified("timeout".into())));

    h.updater
        .submit_profile(&ProfileFormState::for_identity(&before))
        .await;

    assert_eq!(
        h.notifier.titles(ToastKind::Error),
        vec![PROFILE_UPDATE_FALLBACK.to_string()]
    );
}

#[tokio::test]
async fn resubmitting_an_unchanged_form_does_not_drift() {
    let before = with_avatar(identity("Alex"), "a.png");
    let h = harness(before.clone());
    let form = ProfileFormState::for_identity(&before);

    let first = h.updater.submit_profile(&form).await;
    let second = h.updater.submit_profile(&form).await;

    assert_eq!(first, UpdateOutcome::Updated(before.clone()));
    assert_eq!(second, UpdateOutcome::Updated(before.clone()));
    assert_eq!(h.session.current_identity().await, Some(before));
    assert_eq!(h.service.profile_calls().len(), 2);
    assert_eq!(h.notifier.titles(ToastKind::Success).len(), 2);
}

#[tokio::test]
async fn avatar_replacement_updates_only_the_avatar() {
    let before = with_avatar(identity("Alex Doe"), "old.png");
    let h = harness(before.clone());
    h.service.push_avatar_result(Ok(AvatarUpdated {
        avatar: "new.jpg".into(),
    }));

    let outcome = h.updater.replace_avatar().await;

    let current = h.session.current_identity().await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(current.clone()));
    assert_eq!(current.avatar.as_deref(), Some("new.jpg"));
    assert_eq!(current.name, before.name);

    let uploads = h.service.avatar_calls();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "alex doe.jpg");
    assert_eq!(uploads[0].mime_type, "image/jpg");
    assert_eq!(
        h.notifier.titles(ToastKind::Success),
        vec![AVATAR_UPDATED.to_string()]
    );
}

#[tokio::test]
async fn avatar_at_the_limit_is_uploaded() {
    let h = harness_with(
        signed_in(identity("Alex")),
        StubProfileService::new(),
        StubAssetSource::selecting("file:///photos/edge.png", MAX_AVATAR_BYTES),
    );

    assert!(h.updater.replace_avatar().await.is_updated());
    assert_eq!(h.service.avatar_calls()[0].byte_size, MAX_AVATAR_BYTES);
}

#[tokio::test]
async fn failed_avatar_upload_keeps_the_old_photo() {
    let before = with_avatar(identity("Alex"), "old.png");
    let h = harness(before.clone());
    h.service
        .push_avatar_result(Err(ServiceError::Unclassified("502".into())));

    let outcome = h.updater.replace_avatar().await;

    assert!(matches!(outcome, UpdateOutcome::Failed(ProfileError::Service(_))));
    assert_eq!(h.session.current_identity().await, Some(before));
    assert_eq!(
        h.notifier.titles(ToastKind::Error),
        vec![AVATAR_UPDATE_FALLBACK.to_string()]
    );
}

#[tokio::test]
async fn cancelled_pick_does_nothing() {
    let before = identity("Alex");
    let assets = StubAssetSource::cancelled();
    let h = harness_with(
        signed_in(before.clone()),
        StubProfileService::new(),
        assets.clone(),
    );

    assert_eq!(h.updater.replace_avatar().await, UpdateOutcome::Cancelled);
    assert!(assets.probed().is_empty());
    assert!(h.service.avatar_calls().is_empty());
    assert!(h.notifier.toasts().is_empty());
    assert_eq!(h.updater.avatar_phase(), OperationPhase::Idle);
}

#[tokio::test]
async fn failed_metadata_read_is_a_failure_not_an_upload() {
    let h = harness_with(
        signed_in(identity("Alex")),
        StubProfileService::new(),
        StubAssetSource::selecting("content://media/1.jpg", MIB).with_probe(Err(
            AssetPolicyError::Inaccessible {
                uri: "content://media/1.jpg".into(),
                reason: "permission denied".into(),
            },
        )),
    );

    let outcome = h.updater.replace_avatar().await;

    assert!(matches!(
        outcome,
        UpdateOutcome::Failed(ProfileError::AssetPolicy(
            AssetPolicyError::Inaccessible { .. }
        ))
    ));
    assert!(h.service.avatar_calls().is_empty());
    assert_eq!(h.notifier.toasts().len(), 1);
}

#[tokio::test]
async fn picker_failure_is_reported() {
    let h = harness_with(
        signed_in(identity("Alex")),
        StubProfileService::new(),
        StubAssetSource::failing(AssetPolicyError::PickerFailed(
            "library unavailable".into(),
        )),
    );

    let outcome = h.updater.replace_avatar().await;

    assert!(matches!(
        outcome,
        UpdateOutcome::Failed(ProfileError::AssetPolicy(
            AssetPolicyError::PickerFailed(_)
        ))
    ));
    assert_eq!(h.notifier.titles(ToastKind::Error).len(), 1);
}

#[tokio::test]
async fn signed_out_session_is_not_updated() {
    let h = harness_with(
        Arc::new(SessionStore::new()),
        StubProfileService::new(),
        StubAssetSource::selecting("file:///photos/me.jpg", MIB),
    );
    let form = ProfileFormState::for_identity(&identity("Alex"));

    assert_eq!(
        h.updater.submit_profile(&form).await,
        UpdateOutcome::Failed(ProfileError::NotAuthenticated)
    );
    assert_eq!(
        h.updater.replace_avatar().await,
        UpdateOutcome::Failed(ProfileError::NotAuthenticated)
    );
    assert!(h.service.profile_calls().is_empty());
    assert!(h.service.avatar_calls().is_empty());
    assert_eq!(
        h.notifier.titles(ToastKind::Error),
        vec![SESSION_EXPIRED.to_string(), SESSION_EXPIRED.to_string()]
    );
}

#[tokio::test]
async fn duplicate_submit_while_in_flight_is_busy() {
    let before = identity("Alex");
    let h = harness_with(
        signed_in(before.clone()),
        StubProfileService::held(),
        StubAssetSource::selecting("file:///photos/me.jpg", MIB),
    );
    let form = ProfileFormState::for_identity(&before).with_name("Alexa");

    let first = tokio::spawn({
        let updater = h.updater.clone();
        let form = form.clone();
        async move { updater.submit_profile(&form).await }
    });
    h.service.wait_entered().await;

    assert_eq!(h.updater.profile_phase(), OperationPhase::Submitting);
    assert_eq!(h.updater.submit_profile(&form).await, UpdateOutcome::Busy);
    // The avatar operation has its own gate.
    assert_eq!(h.updater.avatar_phase(), OperationPhase::Idle);

    h.service.release();
    assert!(first.await.unwrap().is_updated());

    assert_eq!(h.service.profile_calls().len(), 1);
    assert_eq!(h.notifier.toasts().len(), 1);
    assert_eq!(h.updater.profile_phase(), OperationPhase::Idle);
}

#[tokio::test]
async fn concurrent_name_and_avatar_updates_both_survive() {
    let before = with_avatar(identity("Alex"), "old.png");
    let h = harness_with(
        signed_in(before.clone()),
        StubProfileService::held(),
        StubAssetSource::selecting("file:///photos/me.jpg", MIB),
    );
    h.service.push_avatar_result(Ok(AvatarUpdated {
        avatar: "fresh.jpg".into(),
    }));

    let text = tokio::spawn({
        let updater = h.updater.clone();
        let form = ProfileFormState::for_identity(&before).with_name("Alexa");
        async move { updater.submit_profile(&form).await }
    });
    h.service.wait_entered().await;

    let photo = tokio::spawn({
        let updater = h.updater.clone();
        async move { updater.replace_avatar().await }
    });
    h.service.wait_entered().await;

    h.service.release();
    h.service.release();
    assert!(text.await.unwrap().is_updated());
    assert!(photo.await.unwrap().is_updated());

    let current = h.session.current_identity().await.unwrap();
    assert_eq!(current.name, "Alexa");
    assert_eq!(current.avatar.as_deref(), Some("fresh.jpg"));
    assert_eq!(current.email, before.email);
}

/// Session whose reads take a while, so commits can overlap
struct SlowSession {
    inner: SessionStore,
}

#[async_trait::async_trait]
impl SessionProjection for SlowSession {
    async fn current_identity(&self) -> Option<Identity> {
        let identity = self.inner.current_identity().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        identity
    }

    async fn apply_identity_update(&self, identity: Identity) {
        self.inner.apply_identity_update(identity).await;
    }
}

#[tokio::test]
async fn overlapping_commits_keep_both_fields() {
    let before = with_avatar(identity("Alex"), "old.png");
    let session = Arc::new(SlowSession {
        inner: SessionStore::with_identity(before.clone()),
    });
    let service = StubProfileService::held();
    service.push_avatar_result(Ok(AvatarUpdated {
        avatar: "fresh.jpg".into(),
    }));
    let notifier = RecordingNotifier::new();
    let updater = Arc::new(ProfileUpdater::new(
        session.clone(),
        Arc::new(service.clone()),
        Arc::new(StubAssetSource::selecting("file:///photos/me.jpg", MIB)),
        Arc::new(notifier.clone()),
    ));

    let text = tokio::spawn({
        let updater = updater.clone();
        let form = ProfileFormState::for_identity(&before).with_name("Alexa");
        async move { updater.submit_profile(&form).await }
    });
    service.wait_entered().await;
    let photo = tokio::spawn({
        let updater = updater.clone();
        async move { updater.replace_avatar().await }
    });
    service.wait_entered().await;

    service.release();
    service.release();
    assert!(text.await.unwrap().is_updated());
    assert!(photo.await.unwrap().is_updated());

    let current = session.current_identity().await.unwrap();
    assert_eq!(current.name, "Alexa");
    assert_eq!(current.avatar.as_deref(), Some("fresh.jpg"));
    assert_eq!(notifier.titles(ToastKind::Success).len(), 2);
}

#[tokio::test]
async fn session_ending_mid_flight_commits_nothing() {
    let before = identity("Alex");
    let h = harness_with(
        signed_in(before.clone()),
        StubProfileService::held(),
        StubAssetSource::selecting("file:///photos/me.jpg", MIB),
    );
    let form = ProfileFormState::for_identity(&before).with_name("Alexa");

    let pending = tokio::spawn({
        let updater = h.updater.clone();
        async move { updater.submit_profile(&form).await }
    });
    h.service.wait_entered().await;
    h.session.clear().await;
    h.service.release();

    assert_eq!(
        pending.await.unwrap(),
        UpdateOutcome::Failed(ProfileError::NotAuthenticated)
    );
    assert_eq!(h.service.profile_calls().len(), 1);
    assert_eq!(
        h.notifier.titles(ToastKind::Error),
        vec![SESSION_EXPIRED.to_string()]
    );
    assert_eq!(h.notifier.toasts().len(), 1);
    assert_eq!(h.session.current_identity().await, None);
    assert_eq!(h.updater.profile_phase(), OperationPhase::Idle);
}
