//! HTTP client for the Marshal backend

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, ApiResult, Credential, remote_error_message};
use crate::config::ClientConfig;
use crate::session::{AuthBackend, SessionManager};
use crate::storage::SessionStorage;

/// Body field carrying the error text on most routes
pub(crate) const ERROR_FIELD: &str = "error";

/// Client for the validation, repair, waitlist and dashboard endpoints.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl BackendClient {
    /// Create an anonymous client for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        BackendClient {
            http: reqwest::Client::new(),
            base_url,
            credential: Credential::Anonymous,
        }
    }

    /// Create a client from configuration. A configured API key becomes the
    /// default credential.
    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(config.backend_url());
        match config.api_key() {
            Some(key) => client.with_credential(Credential::ApiKey(key.to_string())),
            None => client,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Copy of this client authenticated as the signed-in user.
    ///
    /// Fails with [`ApiError::Unauthenticated`] when there is no session.
    pub fn authorized<S, B>(&self, session: &SessionManager<S, B>) -> ApiResult<Self>
    where
        S: SessionStorage,
        B: AuthBackend,
    {
        let credential = session.credential().ok_or(ApiError::Unauthenticated)?;
        Ok(self.clone().with_credential(credential))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder with the client's credential attached
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.credential.header() {
            Some((name, value)) => builder.header(name, value),
            None => builder,
        }
    }

    /// Request builder without any credential
    pub(crate) fn anonymous_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Dashboard routes need a signed-in user, not an API key
    pub(crate) fn require_bearer(&self) -> ApiResult<()> {
        match self.credential {
            Credential::Bearer(_) => Ok(()),
            _ => Err(ApiError::Unauthenticated),
        }
    }

    /// Send a request and decode a 2xx JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
        error_field: &str,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = Self::send(builder, error_field, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::UnexpectedResponse(e.to_string()))
    }

    /// Send a request and map a non-2xx response to [`ApiError::Remote`].
    pub(crate) async fn send(
        builder: RequestBuilder,
        error_field: &str,
        fallback: &str,
    ) -> ApiResult<Response> {
        let response = builder.send().await?;
        Self::ensure_success(response, error_field, fallback).await
    }

    async fn ensure_success(
        response: Response,
        error_field: &str,
        fallback: &str,
    ) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "Backend returned an error status");
        Err(ApiError::Remote {
            status: status.as_u16(),
            message: remote_error_message(&body, error_field, fallback),
        })
    }
}
