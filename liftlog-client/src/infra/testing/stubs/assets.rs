use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::domains::profile::avatar::{
    AssetCandidate, AssetProbe, AssetSource, PickOutcome,
};
use crate::domains::profile::errors::AssetPolicyError;

/// [`AssetSource`] with a fixed pick and probe
#[derive(Debug, Clone)]
pub struct StubAssetSource {
    pick: Result<PickOutcome, AssetPolicyError>,
    probe: Result<AssetProbe, AssetPolicyError>,
    probed: Arc<Mutex<Vec<String>>>,
}

impl StubAssetSource {
    /// The user picks `uri`, which exists and is `byte_size` long
    pub fn selecting(uri: &str, byte_size: u64) -> Self {
        Self {
            pick: Ok(PickOutcome::Selected(AssetCandidate {
                uri: uri.to_string(),
                byte_size: Some(byte_size),
                mime_hint: Some("image".to_string()),
            })),
            probe: Ok(AssetProbe {
                exists: true,
                byte_size,
            }),
            probed: Arc::default(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            pick: Ok(PickOutcome::Cancelled),
            ..Self::selecting("unused.jpg", 0)
        }
    }

    pub fn failing(err: AssetPolicyError) -> Self {
        Self {
            pick: Err(err),
            ..Self::selecting("unused.jpg", 0)
        }
    }

    pub fn with_probe(
        mut self,
        probe: Result<AssetProbe, AssetPolicyError>,
    ) -> Self {
        self.probe = probe;
        self
    }

    pub fn probed(&self) -> Vec<String> {
        lock(&self.probed).clone()
    }
}

#[async_trait]
impl AssetSource for StubAssetSource {
    async fn pick_image(&self) -> Result<PickOutcome, AssetPolicyError> {
        self.pick.clone()
    }

    async fn probe(&self, uri: &str) -> Result<AssetProbe, AssetPolicyError> {
        lock(&self.probed).push(uri.to_string());
        self.probe.clone()
    }
}
