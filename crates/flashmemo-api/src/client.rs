//! Shared HTTP client for the Flashmemo REST API.

use crate::error::{ApiError, ApiResult};
use flashmemo_config_and_utils::Config;
use parking_lot::RwLock;
use reqwest::{header, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// REST client shared by every caller in the process.
///
/// Clones share the same connection pool and the same bearer slot, so a token
/// attached through one handle applies to requests made through all of them.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("flashmemo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            base_url: normalize_base(base_url),
            bearer: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let base_url = config
            .api_url()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send `Authorization: Bearer <token>` on every subsequent request.
    pub fn attach_token(&self, token: &str) {
        *self.bearer.write() = Some(token.to_string());
        debug!("Bearer credential attached");
    }

    /// Stop sending the authorization header.
    pub fn detach_token(&self) {
        if self.bearer.write().take().is_some() {
            debug!("Bearer credential detached");
        }
    }

    /// Token currently attached, if any.
    pub fn bearer_token(&self) -> Option<String> {
        self.bearer.read().clone()
    }

    /// Value of the authorization header requests currently carry.
    pub fn authorization_header(&self) -> Option<String> {
        self.bearer
            .read()
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }

    pub(crate) fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self.http_client.request(method, url);
        if let Some(value) = self.authorization_header() {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose success body is not used.
    pub(crate) async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let body_summary = summarize_response_body(&body);
            warn!(
                status = status.as_u16(),
                path = %path,
                body_summary = %body_summary,
                "API request failed"
            );
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), path = %path, bytes = body.len(), "API request succeeded");
        Ok(body)
    }
}

/// `Url::join` replaces the last path segment unless it ends with `/`.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.bearer.read().is_some())
            .finish_non_exhaustive()
    }
}
