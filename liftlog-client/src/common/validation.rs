//! Declarative field validation
//!
//! A form schema is an ordered list of fields, each with an ordered list of
//! rules. A rule is a plain function that inspects the whole form and
//! returns a message when it is violated, which lets a rule on one field
//! depend on the value of another (the password cascade). For every field
//! the first violated rule wins, so at most one message is reported per
//! field.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Fields that can carry an error message across the account forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    OldPassword,
    NewPassword,
    ConfirmPassword,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::OldPassword => "old_password",
            FormField::NewPassword => "new_password",
            FormField::ConfirmPassword => "confirm_password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single check over a form snapshot
pub type Rule<F> = fn(&F) -> Option<&'static str>;

/// Rules attached to one field, evaluated in declaration order
#[derive(Debug)]
pub struct FieldRules<F: 'static> {
    pub field: FormField,
    pub rules: &'static [Rule<F>],
}

/// Field-level messages produced by a schema. Empty means submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FormField, &'static str>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn has_error(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }
}

/// Run `schema` over `form`. Never fails; pure and deterministic.
pub fn evaluate<F: 'static>(
    form: &F,
    schema: &[FieldRules<F>],
) -> ValidationResult {
    let errors = schema
        .iter()
        .filter_map(|entry| {
            entry
                .rules
                .iter()
                .find_map(|rule| rule(form))
                .map(|message| (entry.field, message))
        })
        .collect();

    ValidationResult { errors }
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern is a valid literal")
});

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn looks_like_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Length in characters, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
