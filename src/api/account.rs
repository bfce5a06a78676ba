//! Dashboard endpoints: API keys and usage
//!
//! All of these need a bearer credential; see
//! [`BackendClient::authorized`].

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::client::ERROR_FIELD;
use super::{ApiError, ApiResult, BackendClient};
use crate::models::{ApiKey, CreatedApiKey, UsageStats};
use crate::validation::validate_api_key_name;

/// `{"data": ...}` wrapper used by the key endpoints
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Option<T>,
}

#[derive(Serialize)]
struct CreateKeyPayload<'a> {
    name: &'a str,
}

impl BackendClient {
    /// List the user's API keys
    pub async fn list_api_keys(&self) -> ApiResult<Vec<ApiKey>> {
        self.require_bearer()?;
        let builder = self.request(Method::GET, "/api-keys");
        let envelope: DataEnvelope<Vec<ApiKey>> =
            Self::send_json(builder, ERROR_FIELD, "Failed to fetch API keys").await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a key. The secret in the result is only ever returned here.
    pub async fn create_api_key(&self, name: &str) -> ApiResult<CreatedApiKey> {
        self.require_bearer()?;
        validate_api_key_name(name)?;

        let builder = self
            .request(Method::POST, "/api-keys")
            .json(&CreateKeyPayload { name: name.trim() });
        let envelope: DataEnvelope<CreatedApiKey> =
            Self::send_json(builder, ERROR_FIELD, "Failed to create API key").await?;

        let created = envelope
            .data
            .ok_or_else(|| ApiError::UnexpectedResponse("missing data".to_string()))?;
        info!(name = %name.trim(), "API key created");
        Ok(created)
    }

    /// Revoke a key by id
    pub async fn revoke_api_key(&self, id: &str) -> ApiResult<()> {
        self.require_bearer()?;
        let id = id.trim();
        if id.is_empty() {
            return Err(crate::validation::ValidationError::Required("API key ID").into());
        }

        let path = format!("/api-keys/{}", urlencoding::encode(id));
        Self::send(
            self.request(Method::DELETE, &path),
            ERROR_FIELD,
            "Failed to revoke API key",
        )
        .await?;
        info!(id = %id, "API key revoked");
        Ok(())
    }

    /// Monthly quota and consumption
    pub async fn usage(&self) -> ApiResult<UsageStats> {
        self.require_bearer()?;
        let builder = self.request(Method::GET, "/api-keys/usage");
        Self::send_json(builder, ERROR_FIELD, "Failed to fetch usage stats").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Credential;

    #[test]
    fn test_envelope_decoding() {
        let body = r#"{"data":[{"id":"k1","name":"ci","expires_in_ms":0}]}"#;
        let envelope: DataEnvelope<Vec<ApiKey>> = serde_json::from_str(body).unwrap();
        let keys = envelope.data.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].name, "ci");

        let envelope: DataEnvelope<Vec<ApiKey>> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_requires_bearer() {
        let client = BackendClient::new("http://127.0.0.1:9");
        assert_eq!(client.list_api_keys().await, Err(ApiError::Unauthenticated));
        assert_eq!(client.usage().await, Err(ApiError::Unauthenticated));

        let keyed = client.with_credential(Credential::ApiKey("k".into()));
        assert_eq!(
            keyed.revoke_api_key("k1").await,
            Err(ApiError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn test_blank_key_name_rejected_locally() {
        let client = BackendClient::new("http://127.0.0.1:9")
            .with_credential(Credential::Bearer("a1".into()));
        let err = client.create_api_key("   ").await.unwrap_err();
        assert_eq!(err.user_message(), "API key name is required");
    }
}
