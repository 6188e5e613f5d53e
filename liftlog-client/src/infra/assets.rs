//! Local file backed [`AssetSource`]
//!
//! The CLI has no image library to open, so the "picker" is the path the
//! user passed on the command line. No path means the user cancelled.

use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domains::profile::avatar::{
    AssetCandidate, AssetProbe, AssetSource, PickOutcome,
};
use crate::domains::profile::errors::AssetPolicyError;

#[derive(Debug, Clone, Default)]
pub struct FsAssetSource {
    selection: Option<String>,
    mime_hint: Option<String>,
}

impl FsAssetSource {
    pub fn new(selection: Option<String>) -> Self {
        Self {
            selection,
            mime_hint: Some("image".to_string()),
        }
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn pick_image(&self) -> Result<PickOutcome, AssetPolicyError> {
        let Some(uri) = self.selection.clone() else {
            return Ok(PickOutcome::Cancelled);
        };

        let byte_size = tokio::fs::metadata(uri_to_path(&uri))
            .await
            .ok()
            .map(|meta| meta.len());

        Ok(PickOutcome::Selected(AssetCandidate {
            uri,
            byte_size,
            mime_hint: self.mime_hint.clone(),
        }))
    }

    async fn probe(&self, uri: &str) -> Result<AssetProbe, AssetPolicyError> {
        let path = uri_to_path(uri);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(AssetProbe {
                exists: true,
                byte_size: meta.len(),
            }),
            Ok(_) => Err(AssetPolicyError::Inaccessible {
                uri: uri.to_string(),
                reason: "not a regular file".to_string(),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("[Assets] {} does not exist", path.display());
                Ok(AssetProbe {
                    exists: false,
                    byte_size: 0,
                })
            }
            Err(err) => Err(AssetPolicyError::Inaccessible {
                uri: uri.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

/// Local path for a `file://` URI or a plain path
pub fn uri_to_path(uri: &str) -> PathBuf {
    if uri.starts_with("file:")
        && let Ok(url) = url::Url::parse(uri)
        && let Ok(path) = url.to_file_path()
    {
        return path;
    }
    PathBuf::from(uri)
}
