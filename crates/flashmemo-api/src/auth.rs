//! Sign-in and sign-up endpoints.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{AuthPayload, AuthSession};
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

impl ApiClient {
    /// `POST /sign-in`. Fails unless the response carries both a user and a token.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        debug!("Requesting sign-in");
        let builder = self
            .request(Method::POST, "/sign-in")?
            .json(&SignInRequest { email, password });
        let payload: AuthPayload = self.send_json(builder).await?;
        payload.into_session()
    }

    /// `POST /sign-up`. Same contract as [`ApiClient::sign_in`].
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> ApiResult<AuthSession> {
        debug!("Requesting sign-up");
        let builder = self
            .request(Method::POST, "/sign-up")?
            .json(&SignUpRequest {
                email,
                password,
                name,
            });
        let payload: AuthPayload = self.send_json(builder).await?;
        payload.into_session()
    }
}
