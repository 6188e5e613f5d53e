//! Core data model definitions shared across Liftlog crates.
#![allow(missing_docs)]

pub mod error;
pub mod history;
pub mod identity;
pub mod requests;

// Intentionally curated re-exports for downstream consumers.
pub use error::ErrorBody;
pub use history::{HistoryByDay, HistoryEntry};
pub use identity::{AuthSession, Identity};
pub use requests::{
    AvatarUpdated, SignInRequest, SignUpRequest, UpdateProfileRequest,
};
