//! HTTP implementation of [`AuthBackend`]

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::backend::{AuthBackend, RefreshResponse};
use crate::api::client::ERROR_FIELD;
use crate::api::{ApiError, ApiResult, BackendClient};
use crate::models::LoginCallback;

#[derive(Serialize)]
struct RefreshPayload<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct LoginUrlResponse {
    #[serde(default)]
    auth_url: Option<String>,
}

/// Talks to the `/auth/*` routes of the Marshal backend.
///
/// Requests never carry the client's API key; logout carries the access
/// token being revoked.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: BackendClient,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_client(BackendClient::new(base_url))
    }

    /// Share the connection pool of an existing client
    pub fn from_client(client: BackendClient) -> Self {
        HttpAuthBackend { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn callback_path(code: &str, state: &str) -> String {
        format!(
            "/auth/google/callback?code={}&state={}",
            urlencoding::encode(code),
            urlencoding::encode(state)
        )
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthBackend for HttpAuthBackend {
    async fn refresh(&self, refresh_token: &str) -> ApiResult<RefreshResponse> {
        let builder = self
            .client
            .anonymous_request(Method::POST, "/auth/refresh")
            .json(&RefreshPayload { refresh_token });
        BackendClient::send_json(builder, ERROR_FIELD, "Failed to refresh token").await
    }

    async fn logout(&self, access_token: &str) -> ApiResult<()> {
        let builder = self
            .client
            .anonymous_request(Method::POST, "/auth/logout")
            .bearer_auth(access_token);
        BackendClient::send(builder, ERROR_FIELD, "Logout failed").await?;
        Ok(())
    }

    async fn login_url(&self) -> ApiResult<String> {
        let builder = self
            .client
            .anonymous_request(Method::GET, "/auth/google/login");
        let response: LoginUrlResponse =
            BackendClient::send_json(builder, ERROR_FIELD, "Failed to initiate Google login")
                .await?;
        response
            .auth_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::UnexpectedResponse("missing auth_url".to_string()))
    }

    async fn exchange_code(&self, code: &str, state: &str) -> ApiResult<LoginCallback> {
        let builder = self
            .client
            .anonymous_request(Method::GET, &Self::callback_path(code, state));
        BackendClient::send_json(builder, ERROR_FIELD, "Authentication failed").await
    }
}
