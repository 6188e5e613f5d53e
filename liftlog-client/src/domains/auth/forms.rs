//! Sign-in and sign-up forms

use crate::common::validation::{
    self, FieldRules, FormField, ValidationResult, is_blank, looks_like_email,
};
use crate::domains::auth::security::SecureCredential;

pub const NAME_REQUIRED: &str = "Please fill in the Name!";
pub const EMAIL_REQUIRED: &str = "Please fill in the E-mail!";
pub const EMAIL_INVALID: &str = "Invalid E-mail!";
pub const SIGN_IN_PASSWORD_REQUIRED: &str = "Please fill in the Password!";
pub const SIGN_UP_PASSWORD_REQUIRED: &str = "Please fill in the Password";
pub const PASSWORD_TOO_SHORT: &str =
    "The password must be at least 6 characters long!";
pub const PASSWORD_TOO_LONG: &str = "The password cannot exceed 25 characters!";
pub const SIGN_UP_CONFIRM_MISMATCH: &str =
    "The password confirmation does not match the entered password!";

pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 25;

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: SecureCredential,
}

impl SignInForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<SecureCredential>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: SecureCredential,
    pub password_confirm: SecureCredential,
}

fn email_required<F: HasEmail>(form: &F) -> Option<&'static str> {
    is_blank(form.email()).then_some(EMAIL_REQUIRED)
}

fn email_format<F: HasEmail>(form: &F) -> Option<&'static str> {
    (!looks_like_email(form.email())).then_some(EMAIL_INVALID)
}

trait HasEmail {
    fn email(&self) -> &str;
}

impl HasEmail for SignInForm {
    fn email(&self) -> &str {
        &self.email
    }
}

impl HasEmail for SignUpForm {
    fn email(&self) -> &str {
        &self.email
    }
}

fn too_short(secret: &SecureCredential) -> Option<&'static str> {
    (secret.char_len() < PASSWORD_MIN_CHARS).then_some(PASSWORD_TOO_SHORT)
}

fn too_long(secret: &SecureCredential) -> Option<&'static str> {
    (secret.char_len() > PASSWORD_MAX_CHARS).then_some(PASSWORD_TOO_LONG)
}

const SIGN_IN_SCHEMA: &[FieldRules<SignInForm>] = &[
    FieldRules {
        field: FormField::Email,
        rules: &[email_required::<SignInForm>, email_format::<SignInForm>],
    },
    FieldRules {
        field: FormField::Password,
        rules: &[
            |form| {
                form.password.is_empty().then_some(SIGN_IN_PASSWORD_REQUIRED)
            },
            |form| too_long(&form.password),
        ],
    },
];

const SIGN_UP_SCHEMA: &[FieldRules<SignUpForm>] = &[
    FieldRules {
        field: FormField::Name,
        rules: &[|form| is_blank(&form.name).then_some(NAME_REQUIRED)],
    },
    FieldRules {
        field: FormField::Email,
        rules: &[email_required::<SignUpForm>, email_format::<SignUpForm>],
    },
    FieldRules {
        field: FormField::Password,
        rules: &[
            |form| {
                form.password.is_empty().then_some(SIGN_UP_PASSWORD_REQUIRED)
            },
            |form| too_short(&form.password),
            |form| too_long(&form.password),
        ],
    },
    FieldRules {
        field: FormField::ConfirmPassword,
        rules: &[
            |form| {
                form.password_confirm
                    .is_empty()
                    .then_some(SIGN_UP_PASSWORD_REQUIRED)
            },
            |form| too_short(&form.password_confirm),
            |form| too_long(&form.password_confirm),
            |form| {
                (form.password_confirm != form.password)
                    .then_some(SIGN_UP_CONFIRM_MISMATCH)
            },
        ],
    },
];

pub fn validate_sign_in(form: &SignInForm) -> ValidationResult {
    validation::evaluate(form, SIGN_IN_SCHEMA)
}

pub fn validate_sign_up(form: &SignUpForm) -> ValidationResult {
    validation::evaluate(form, SIGN_UP_SCHEMA)
}
