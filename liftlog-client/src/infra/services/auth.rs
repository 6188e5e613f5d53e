use async_trait::async_trait;
use liftlog_model::{AuthSession, Identity, SignInRequest, SignUpRequest};
use log::info;
use std::sync::Arc;

use crate::domains::auth::security::SecureCredential;
use crate::infra::{
    api_client::ApiClient, constants::routes, services::ServiceResult,
};

/// Credential check against the server
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Sign in and return the user. Token handling is the implementation's
    /// concern; the caller stores the identity in the session.
    async fn sign_in(
        &self,
        email: &str,
        password: &SecureCredential,
    ) -> ServiceResult<Identity>;
}

/// Account registration
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecureCredential,
    ) -> ServiceResult<()>;
}

#[derive(Debug, Clone)]
pub struct SessionApiAdapter {
    client: Arc<ApiClient>,
}

impl SessionApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Authenticator for SessionApiAdapter {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecureCredential,
    ) -> ServiceResult<Identity> {
        let body = SignInRequest {
            email: email.trim().to_string(),
            password: password.expose_secret(),
        };
        let session: AuthSession =
            self.client.post(routes::sessions::CREATE, &body).await?;

        self.client.set_token(Some(session.token)).await;
        info!("[Auth] Signed in as user {}", session.user.id);
        Ok(session.user)
    }
}

#[derive(Debug, Clone)]
pub struct AccountApiAdapter {
    client: Arc<ApiClient>,
}

impl AccountApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountService for AccountApiAdapter {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecureCredential,
    ) -> ServiceResult<()> {
        let body = SignUpRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.expose_secret(),
        };
        Ok(self
            .client
            .post_no_content(routes::users::COLLECTION, &body)
            .await?)
    }
}
