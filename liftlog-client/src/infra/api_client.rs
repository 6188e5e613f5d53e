use liftlog_model::ErrorBody;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures of a single HTTP exchange
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, timeout or body transfer failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server rejected the request with a message meant for the user
    #[error("{message}")]
    Application { status: StatusCode, message: String },

    /// Server rejected the request without a usable message
    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The file grew past the upload limit after it was vetted
    #[error("Upload {path} is {byte_size} bytes, over the {limit} byte limit")]
    UploadTooLarge {
        path: String,
        byte_size: u64,
        limit: u64,
    },

    #[error("Failed to read upload {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// API client with bearer-token authentication
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

/// Add a scheme when missing and drop the trailing slash, so that
/// "localhost:3333/" and "http://localhost:3333" behave the same.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let normalized = normalize_base_url(base_url);
        if normalized != base_url {
            warn!(
                "[ApiClient] Normalized base URL from '{}' to '{}'",
                base_url, normalized
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            normalized
        );

        Ok(Self {
            client,
            base_url: normalized,
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    /// Build an absolute URL for a route
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the authentication token
    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    /// Build a request with authentication headers
    async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token_store.read().await.as_ref() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    /// Turn non-success responses into errors, keeping the server's
    /// message when it sent one
    async fn check_status(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("[ApiClient] Unauthorized response, clearing token");
            self.set_token(None).await;
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { message }) if !message.trim().is_empty() => {
                Err(ApiError::Application { status, message })
            }
            _ => Err(ApiError::Status { status, body }),
        }
    }

    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Execute a request whose success body may be empty or absent
    async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<Option<T>> {
        let response = self.check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!(
                    "[ApiClient] Ignoring undecodable success body: {}",
                    err
                );
                Ok(None)
            }
        }
    }

    /// GET request with authentication
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.build_url(path);
        debug!("[ApiClient] GET {}", url);

        let request = self.build_request(self.client.get(&url)).await;
        self.execute_request(request).await
    }

    /// POST request with authentication
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<R> {
        let url = self.build_url(path);
        debug!("[ApiClient] POST {}", url);

        let request =
            self.build_request(self.client.post(&url).json(body)).await;
        self.execute_request(request).await
    }

    /// POST request for endpoints that answer without a body
    pub async fn post_no_content<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<()> {
        let url = self.build_url(path);
        debug!("[ApiClient] POST {}", url);

        let request =
            self.build_request(self.client.post(&url).json(body)).await;
        self.check_status(request.send().await?).await?;
        Ok(())
    }

    /// PUT request; the response body is decoded when one is present
    pub async fn put<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<Option<R>> {
        let url = self.build_url(path);
        debug!("[ApiClient] PUT {}", url);

        let request =
            self.build_request(self.client.put(&url).json(body)).await;
        self.execute_optional(request).await
    }

    /// Multipart PATCH request
    pub async fn patch_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<R> {
        let url = self.build_url(path);
        debug!("[ApiClient] PATCH (multipart) {}", url);

        let request =
            self.build_request(self.client.patch(&url).multipart(form)).await;
        self.execute_request(request).await
    }
}
