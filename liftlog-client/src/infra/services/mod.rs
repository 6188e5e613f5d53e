//! Service abstractions over the remote API
//!
//! Domains depend on these traits; the `*ApiAdapter` types implement them
//! on top of [`ApiClient`](crate::infra::api_client::ApiClient) and the
//! stubs in `infra::testing` implement them for tests.

use thiserror::Error;

use crate::infra::api_client::ApiError;

pub mod auth;
pub mod history;
pub mod profile;

pub use auth::{
    AccountApiAdapter, AccountService, Authenticator, SessionApiAdapter,
};
pub use history::{HistoryApiAdapter, HistoryService};
pub use profile::{ProfileApiAdapter, ProfileService};

/// Remote failure as seen by the workflows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The server refused with a reason that is safe to show verbatim
    #[error("{0}")]
    Application(String),

    /// Transport or server failure without a known reason
    #[error("Unclassified failure: {0}")]
    Unclassified(String),
}

impl ServiceError {
    /// Text to show the user: the server's message, or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Application(message) => message.clone(),
            ServiceError::Unclassified(_) => fallback.to_string(),
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Application { message, .. } => {
                ServiceError::Application(message)
            }
            other => ServiceError::Unclassified(other.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
