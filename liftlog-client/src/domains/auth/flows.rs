//! Sign-in and sign-up submission

use std::sync::Arc;

use liftlog_model::Identity;
use log::{debug, info, warn};

use crate::common::validation::ValidationResult;
use crate::domains::auth::forms::{
    SignInForm, SignUpForm, validate_sign_in, validate_sign_up,
};
use crate::domains::auth::session::SessionProjection;
use crate::domains::profile::state_types::{OperationGate, OperationPhase};
use crate::domains::ui::feedback::{NotificationSink, ToastNotification};
use crate::infra::services::{
    ServiceError,
    auth::{AccountService, Authenticator},
};

pub const SIGN_IN_FALLBACK: &str =
    "It was not possible to log in, please try again later!";
pub const SIGN_UP_FALLBACK: &str =
    "Unable to process sign up at the moment. \nPlease try again later!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    /// The session now holds this identity
    SignedIn(Identity),
    Invalid(ValidationResult),
    Busy,
    Failed(ServiceError),
}

pub struct AccountFlows {
    authenticator: Arc<dyn Authenticator>,
    accounts: Arc<dyn AccountService>,
    session: Arc<dyn SessionProjection>,
    notifier: Arc<dyn NotificationSink>,
    gate: OperationGate,
}

impl std::fmt::Debug for AccountFlows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountFlows")
            .field("phase", &self.phase())
            .finish()
    }
}

impl AccountFlows {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        accounts: Arc<dyn AccountService>,
        session: Arc<dyn SessionProjection>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            authenticator,
            accounts,
            session,
            notifier,
            gate: OperationGate::new("account"),
        }
    }

    pub fn phase(&self) -> OperationPhase {
        self.gate.phase()
    }

    pub async fn sign_in(&self, form: &SignInForm) -> AccountOutcome {
        let Some(_guard) = self.gate.try_begin() else {
            return AccountOutcome::Busy;
        };

        let validation = validate_sign_in(form);
        if !validation.is_valid() {
            debug!("[Auth] Sign-in form invalid");
            return AccountOutcome::Invalid(validation);
        }

        match self.authenticate(&form.email, form).await {
            Ok(identity) => AccountOutcome::SignedIn(identity),
            Err(err) => {
                warn!("[Auth] Sign-in failed: {}", err);
                self.notifier.notify(ToastNotification::error(
                    err.user_message(SIGN_IN_FALLBACK),
                ));
                AccountOutcome::Failed(err)
            }
        }
    }

    /// Register, then sign in with the same credentials
    pub async fn sign_up(&self, form: &SignUpForm) -> AccountOutcome {
        let Some(_guard) = self.gate.try_begin() else {
            return AccountOutcome::Busy;
        };

        let validation = validate_sign_up(form);
        if !validation.is_valid() {
            debug!("[Auth] Sign-up form invalid");
            return AccountOutcome::Invalid(validation);
        }

        let result = match self
            .accounts
            .register(&form.name, &form.email, &form.password)
            .await
        {
            Ok(()) => {
                info!("[Auth] Account created, signing in");
                let credentials =
                    SignInForm::new(form.email.clone(), form.password.clone());
                self.authenticate(&form.email, &credentials).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(identity) => AccountOutcome::SignedIn(identity),
            Err(err) => {
                warn!("[Auth] Sign-up failed: {}", err);
                self.notifier.dismiss_all();
                self.notifier.notify(ToastNotification::error(
                    err.user_message(SIGN_UP_FALLBACK),
                ));
                AccountOutcome::Failed(err)
            }
        }
    }

    async fn authenticate(
        &self,
        email: &str,
        form: &SignInForm,
    ) -> Result<Identity, ServiceError> {
        let identity = self
            .authenticator
            .sign_in(email.trim(), &form.password)
            .await?;
        self.session.apply_identity_update(identity.clone()).await;
        Ok(identity)
    }
}
