//! Profile update error types
//!
//! The `Display` text of an [`AssetPolicyError`] is written for the user
//! and is what the orchestrator shows in the notification.

use thiserror::Error;

use crate::infra::services::ServiceError;

/// An avatar was refused before anything was uploaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetPolicyError {
    /// Asset is larger than the upload limit
    #[error(
        "The selected image is oversized, please choose another one (max 5Mb)!"
    )]
    Oversized { byte_size: u64, limit: u64 },

    /// Asset could not be found or its size could not be determined
    #[error("The selected image could not be read, please choose another one!")]
    Inaccessible { uri: String, reason: String },

    /// Asset has no file extension to derive a name and type from
    #[error(
        "The selected file is not a supported image, please choose another one!"
    )]
    UnsupportedFormat { uri: String },

    /// The image library itself failed (distinct from the user cancelling)
    #[error("It was not possible to open the image library, please try again!")]
    PickerFailed(String),
}

/// Why a profile or avatar update did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    AssetPolicy(#[from] AssetPolicyError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
