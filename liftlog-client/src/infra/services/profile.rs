use async_trait::async_trait;
use liftlog_model::{AvatarUpdated, Identity};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

use crate::domains::profile::avatar::{AvatarUpload, MAX_AVATAR_BYTES};
use crate::domains::profile::form::ProfileUpdate;
use crate::infra::{
    api_client::{ApiClient, ApiError},
    assets::uri_to_path,
    constants::routes,
    services::ServiceResult,
};

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Persist the name and, when present, the password change. Returns
    /// the server's view of the user when it sends one back.
    async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ServiceResult<Option<Identity>>;

    /// Upload a vetted avatar; returns the new avatar reference
    async fn update_avatar(
        &self,
        upload: &AvatarUpload,
    ) -> ServiceResult<AvatarUpdated>;
}

#[derive(Debug, Clone)]
pub struct ProfileApiAdapter {
    client: Arc<ApiClient>,
}

impl ProfileApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn avatar_form(upload: &AvatarUpload) -> Result<Form, ApiError> {
        let path = uri_to_path(&upload.uri);
        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            ApiError::Upload {
                path: path.display().to_string(),
                source,
            }
        })?;

        let byte_size = bytes.len() as u64;
        if byte_size > MAX_AVATAR_BYTES {
            return Err(ApiError::UploadTooLarge {
                path: path.display().to_string(),
                byte_size,
                limit: MAX_AVATAR_BYTES,
            });
        }

        let part = Part::bytes(bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;
        Ok(Form::new().part(routes::users::AVATAR_FIELD, part))
    }
}

#[async_trait]
impl ProfileService for ProfileApiAdapter {
    async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ServiceResult<Option<Identity>> {
        let body = update.to_request();
        Ok(self.client.put(routes::users::COLLECTION, &body).await?)
    }

    async fn update_avatar(
        &self,
        upload: &AvatarUpload,
    ) -> ServiceResult<AvatarUpdated> {
        let form = Self::avatar_form(upload).await?;
        Ok(self
            .client
            .patch_multipart(routes::users::AVATAR, form)
            .await?)
    }
}
