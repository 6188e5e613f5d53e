//! Avatar selection guard
//!
//! Picks an image, probes it on local storage and turns it into an upload
//! descriptor. Anything over [`MAX_AVATAR_BYTES`] is refused here so that no
//! request is ever made for it. The user closing the picker is a separate,
//! non-error outcome.

use async_trait::async_trait;
use liftlog_model::Identity;
use log::{debug, warn};

use crate::domains::profile::errors::AssetPolicyError;
use crate::infra::constants::routes;

/// Largest accepted avatar. A file of exactly this size is accepted.
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_MEDIA_TYPE: &str = "image";

/// An image the user picked that has not been uploaded yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCandidate {
    pub uri: String,
    /// Size as reported by the picker; the probe is what gets enforced
    pub byte_size: Option<u64>,
    /// Type reported by the picker, e.g. `image` or `image/png`
    pub mime_hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetProbe {
    pub exists: bool,
    pub byte_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(AssetCandidate),
    Cancelled,
}

/// Local image library and file metadata
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn pick_image(&self) -> Result<PickOutcome, AssetPolicyError>;

    async fn probe(&self, uri: &str) -> Result<AssetProbe, AssetPolicyError>;
}

/// Normalized description of an accepted avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub uri: String,
    pub file_name: String,
    pub mime_type: String,
    pub byte_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Accepted(AvatarUpload),
    Cancelled,
}

/// Pick an image and vet it for `display_name`'s avatar
pub async fn select_avatar(
    source: &dyn AssetSource,
    display_name: &str,
) -> Result<GuardOutcome, AssetPolicyError> {
    let candidate = match source.pick_image().await? {
        PickOutcome::Selected(candidate) => candidate,
        PickOutcome::Cancelled => {
            debug!("[AvatarGuard] Selection cancelled");
            return Ok(GuardOutcome::Cancelled);
        }
    };

    let probe = source.probe(&candidate.uri).await?;
    inspect(&candidate, probe, display_name).map(GuardOutcome::Accepted)
}

/// Apply the upload policy to a probed candidate
pub fn inspect(
    candidate: &AssetCandidate,
    probe: AssetProbe,
    display_name: &str,
) -> Result<AvatarUpload, AssetPolicyError> {
    if !probe.exists {
        return Err(AssetPolicyError::Inaccessible {
            uri: candidate.uri.clone(),
            reason: "file does not exist".to_string(),
        });
    }

    if probe.byte_size > MAX_AVATAR_BYTES {
        warn!(
            "[AvatarGuard] Rejected {} bytes (limit {})",
            probe.byte_size, MAX_AVATAR_BYTES
        );
        return Err(AssetPolicyError::Oversized {
            byte_size: probe.byte_size,
            limit: MAX_AVATAR_BYTES,
        });
    }

    let extension = extension_of(&candidate.uri).ok_or_else(|| {
        AssetPolicyError::UnsupportedFormat {
            uri: candidate.uri.clone(),
        }
    })?;

    let mime_type = match candidate.mime_hint.as_deref() {
        Some(hint) if hint.contains('/') => hint.to_string(),
        Some(hint) if !hint.trim().is_empty() => {
            format!("{}/{}", hint.trim(), extension)
        }
        _ => format!("{DEFAULT_MEDIA_TYPE}/{extension}"),
    };

    Ok(AvatarUpload {
        uri: candidate.uri.clone(),
        file_name: format!("{display_name}.{extension}").to_lowercase(),
        mime_type,
        byte_size: probe.byte_size,
    })
}

/// Extension of the last path segment, without query or fragment
fn extension_of(uri: &str) -> Option<&str> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (stem, extension) = file.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension)
}

/// Public URL of the identity's avatar; `None` means show the default photo
pub fn avatar_url(base_url: &str, identity: &Identity) -> Option<String> {
    identity.avatar.as_deref().filter(|a| !a.is_empty()).map(|avatar| {
        format!(
            "{}{}/{}",
            base_url.trim_end_matches('/'),
            routes::avatar::FILES,
            avatar
        )
    })
}
