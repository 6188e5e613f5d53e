//! Rules of the profile form
//!
//! Password rotation is optional. Leaving the new password blank turns the
//! old-password and confirmation rules off entirely; filling it in makes
//! both required.

use crate::common::validation::{
    self, FieldRules, FormField, ValidationResult, is_blank,
};
use crate::domains::auth::forms::{
    NAME_REQUIRED, PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS, PASSWORD_TOO_LONG,
    PASSWORD_TOO_SHORT,
};
use crate::domains::profile::form::ProfileFormState;

pub const OLD_PASSWORD_REQUIRED: &str =
    "Please, fill in the old password to update!";
pub const CONFIRM_REQUIRED: &str =
    "Please, re-enter the new password to update!";
pub const CONFIRM_MISMATCH: &str =
    "The password confirmation does not match the entered new password!";

fn name_required(form: &ProfileFormState) -> Option<&'static str> {
    is_blank(&form.name).then_some(NAME_REQUIRED)
}

fn old_password_required(form: &ProfileFormState) -> Option<&'static str> {
    (form.rotation_requested() && form.old_password.is_empty())
        .then_some(OLD_PASSWORD_REQUIRED)
}

fn new_password_min(form: &ProfileFormState) -> Option<&'static str> {
    (form.rotation_requested()
        && form.new_password.char_len() < PASSWORD_MIN_CHARS)
        .then_some(PASSWORD_TOO_SHORT)
}

fn new_password_max(form: &ProfileFormState) -> Option<&'static str> {
    (form.new_password.char_len() > PASSWORD_MAX_CHARS)
        .then_some(PASSWORD_TOO_LONG)
}

fn confirm_required(form: &ProfileFormState) -> Option<&'static str> {
    (form.rotation_requested() && form.confirm_password.is_empty())
        .then_some(CONFIRM_REQUIRED)
}

fn confirm_matches(form: &ProfileFormState) -> Option<&'static str> {
    (form.rotation_requested() && form.confirm_password != form.new_password)
        .then_some(CONFIRM_MISMATCH)
}

const PROFILE_SCHEMA: &[FieldRules<ProfileFormState>] = &[
    FieldRules {
        field: FormField::Name,
        rules: &[name_required],
    },
    FieldRules {
        field: FormField::OldPassword,
        rules: &[old_password_required],
    },
    FieldRules {
        field: FormField::NewPassword,
        rules: &[new_password_min, new_password_max],
    },
    FieldRules {
        field: FormField::ConfirmPassword,
        rules: &[confirm_required, confirm_matches],
    },
];

/// Field errors for a profile form snapshot
pub fn validate_profile(form: &ProfileFormState) -> ValidationResult {
    validation::evaluate(form, PROFILE_SCHEMA)
}
