//! Marshal SDK - Client library for the Marshal JSON validation and repair API
//!
//! Provides unified interfaces for:
//! - Session lifecycle (tokens, user profile, refresh, logout, auth-change observers)
//! - OpenAPI operation discovery from JSON or YAML schema text
//! - Request orchestration against the Marshal backend (validate, fix, waitlist, dashboard)
//! - Client-side input validation
//! - Configuration files and session storage backends

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod models;
pub mod schema;
pub mod session;
pub mod storage;
pub mod validation;

// Re-export commonly used types
#[cfg(feature = "api-backend")]
pub use api::BackendClient;
pub use api::{ApiError, ApiResult, Credential};
pub use config::{ClientConfig, ConfigError};
#[cfg(feature = "api-backend")]
pub use session::HttpAuthBackend;
pub use session::{AuthBackend, RefreshResponse, SessionManager, Subscription};
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use storage::BrowserStorage;
pub use storage::{FileStorage, MemoryStorage, NoopStorage, SessionStorage};

// Re-export models
pub use models::{
    ApiKey, CreatedApiKey, FieldError, LoginCallback, Operation, SchemaFormat, UsageStats,
    UserProfile, ValidationOutcome, ValidationRequest, WaitlistEntry,
};
pub use schema::{SchemaResolver, extract_operations, parse_schema};
pub use validation::{ValidationError, ValidationResult};

// WASM bindings for schema and input helpers
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod wasm {
    use serde_json;
    use wasm_bindgen::prelude::*;

    /// Extract the operations of an OpenAPI schema.
    ///
    /// # Arguments
    ///
    /// * `schema_text` - OpenAPI document as JSON or YAML
    ///
    /// # Returns
    ///
    /// JSON array of `{id, method, path, summary}`; malformed text gives `[]`
    #[wasm_bindgen]
    pub fn extract_operations_json(schema_text: &str) -> Result<String, JsValue> {
        let operations = crate::schema::extract_operations(schema_text);
        serde_json::to_string(&operations)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Advisory text for a schema without usable operations, or `undefined`
    #[wasm_bindgen]
    pub fn schema_hint(schema_text: &str) -> Option<String> {
        crate::schema::SchemaResolver::with_text(schema_text)
            .hint()
            .map(str::to_string)
    }

    /// Check a validation submission before sending it.
    ///
    /// # Returns
    ///
    /// JSON string with validation result: `{"valid": true}` or `{"valid": false, "error": "error message"}`
    #[wasm_bindgen]
    pub fn check_validation_request(
        json_string: &str,
        schema_text: &str,
        operation_id: &str,
    ) -> Result<String, JsValue> {
        let request = crate::models::ValidationRequest::new(json_string, schema_text, operation_id);
        match crate::validation::validate_request(&request) {
            Ok(()) => Ok(serde_json::json!({"valid": true}).to_string()),
            Err(err) => {
                Ok(serde_json::json!({"valid": false, "error": err.to_string()}).to_string())
            }
        }
    }

    /// Check an email address the way the waitlist form does.
    #[wasm_bindgen]
    pub fn validate_email(email: &str) -> Result<String, JsValue> {
        match crate::validation::validate_email(email) {
            Ok(()) => Ok(serde_json::json!({"valid": true}).to_string()),
            Err(err) => {
                Ok(serde_json::json!({"valid": false, "error": err.to_string()}).to_string())
            }
        }
    }
}
