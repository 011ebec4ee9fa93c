//! Seams between the session and the outside world.
//!
//! `SessionManager` talks to the network only through [`AuthBackend`] and
//! mutates the shared client's authorization header only through
//! [`CredentialAttachment`]. Both are implemented for [`ApiClient`].

use async_trait::async_trait;
use flashmemo_api::{ApiClient, ApiResult, AuthSession};

/// Issues sign-in and sign-up requests.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession>;

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> ApiResult<AuthSession>;
}

/// Owns the bearer credential every outgoing request carries.
pub trait CredentialAttachment: Send + Sync {
    fn attach_token(&self, token: &str);

    fn detach_token(&self);

    /// Token currently attached, if any.
    fn current_token(&self) -> Option<String>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        ApiClient::sign_in(self, email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> ApiResult<AuthSession> {
        ApiClient::sign_up(self, email, password, name).await
    }
}

impl CredentialAttachment for ApiClient {
    fn attach_token(&self, token: &str) {
        ApiClient::attach_token(self, token);
    }

    fn detach_token(&self) {
        ApiClient::detach_token(self);
    }

    fn current_token(&self) -> Option<String> {
        self.bearer_token()
    }
}
