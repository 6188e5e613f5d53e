//! Profile domain
//!
//! Editing the signed-in user's name, rotating the password and replacing
//! the avatar. [`update::ProfileUpdater`] is the orchestrator; the rules it
//! relies on live in [`validation`] and [`avatar`].

pub mod avatar;
pub mod errors;
pub mod form;
pub mod state_types;
pub mod update;
pub mod validation;

pub use avatar::{
    AssetCandidate, AssetProbe, AssetSource, AvatarUpload, GuardOutcome,
    MAX_AVATAR_BYTES, PickOutcome, avatar_url,
};
pub use errors::{AssetPolicyError, ProfileError};
pub use form::{PasswordChange, ProfileFormState, ProfileUpdate};
pub use state_types::{OperationGate, OperationPhase, UpdateOutcome};
pub use update::ProfileUpdater;
pub use validation::validate_profile;
