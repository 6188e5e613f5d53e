pub mod validation;

pub use validation::{FieldRules, FormField, Rule, ValidationResult};
