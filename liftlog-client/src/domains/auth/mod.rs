//! Authentication domain
//!
//! Owns the signed-in identity ([`session`]), the sign-in and sign-up
//! forms with their rules ([`forms`]) and the flows that submit them
//! ([`flows`]).

pub mod flows;
pub mod forms;
pub mod security;
pub mod session;

pub use flows::{AccountFlows, AccountOutcome};
pub use forms::{SignInForm, SignUpForm, validate_sign_in, validate_sign_up};
pub use security::SecureCredential;
pub use session::{SessionProjection, SessionStore};
