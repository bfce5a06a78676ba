//! Auth transport abstraction
//!
//! The session manager never talks HTTP directly; it calls an [`AuthBackend`].
//! [`HttpAuthBackend`](super::http::HttpAuthBackend) is the real one, tests
//! substitute a scripted fake.

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::ApiResult;
use crate::models::LoginCallback;

/// Body of a successful `POST /auth/refresh`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    /// New access token; a 2xx body may omit it
    #[serde(default)]
    pub access_token: Option<String>,
}

impl RefreshResponse {
    pub fn with_token(token: impl Into<String>) -> Self {
        RefreshResponse {
            access_token: Some(token.into()),
        }
    }
}

/// Auth endpoints of the Marshal backend.
///
/// Every method reports a non-2xx response as [`ApiError::Remote`] and a
/// transport failure as [`ApiError::Network`].
///
/// [`ApiError::Remote`]: crate::api::ApiError::Remote
/// [`ApiError::Network`]: crate::api::ApiError::Network
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthBackend: Send + Sync {
    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> ApiResult<RefreshResponse>;

    /// Invalidate the session server-side
    async fn logout(&self, access_token: &str) -> ApiResult<()>;

    /// URL of the Google consent page to redirect the user to
    async fn login_url(&self) -> ApiResult<String>;

    /// Trade the OAuth `code` and `state` for session tokens
    async fn exchange_code(&self, code: &str, state: &str) -> ApiResult<LoginCallback>;
}
