use liftlog_model::{Identity, UpdateProfileRequest};

use crate::domains::auth::security::SecureCredential;

/// Input of one profile edit session
///
/// Created from the current identity when the screen opens and dropped on
/// navigation or after a successful submit. `email` is shown but never
/// sent or edited. Blank password fields mean no rotation was requested.
#[derive(Debug, Clone, Default)]
pub struct ProfileFormState {
    pub name: String,
    email: String,
    pub old_password: SecureCredential,
    pub new_password: SecureCredential,
    pub confirm_password: SecureCredential,
}

impl ProfileFormState {
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            ..Self::default()
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_password_rotation(
        mut self,
        old_password: impl Into<SecureCredential>,
        new_password: impl Into<SecureCredential>,
        confirm_password: impl Into<SecureCredential>,
    ) -> Self {
        self.old_password = old_password.into();
        self.new_password = new_password.into();
        self.confirm_password = confirm_password.into();
        self
    }

    pub fn rotation_requested(&self) -> bool {
        !self.new_password.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: SecureCredential,
    pub new_password: SecureCredential,
}

/// What actually goes to the server for a validated form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub password_change: Option<PasswordChange>,
}

impl ProfileUpdate {
    /// Expects a form that passed validation; the confirmation field is
    /// client-side only and is dropped here.
    pub fn from_form(form: &ProfileFormState) -> Self {
        let password_change = form.rotation_requested().then(|| PasswordChange {
            old_password: form.old_password.clone(),
            new_password: form.new_password.clone(),
        });

        Self {
            name: form.name.trim().to_string(),
            password_change,
        }
    }

    pub fn to_request(&self) -> UpdateProfileRequest {
        let (old_password, password) = match &self.password_change {
            Some(change) => (
                Some(change.old_password.expose_secret()),
                Some(change.new_password.expose_secret()),
            ),
            None => (None, None),
        };

        UpdateProfileRequest {
            name: self.name.clone(),
            old_password,
            password,
        }
    }
}
