//! Validation and repair endpoints

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::ERROR_FIELD;
use super::{ApiResult, BackendClient};
use crate::models::{FieldError, ValidationOutcome, ValidationRequest};
use crate::validation::{validate_fix_input, validate_request};

#[derive(Serialize)]
struct ValidatePayload<'a> {
    open_api_spec: &'a str,
    json_string: &'a str,
    operation_id: &'a str,
}

/// Body of `POST /validator/validate`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ValidateResponse {
    #[serde(default)]
    is_valid: Option<bool>,
    #[serde(default)]
    errors: Option<Vec<BackendFieldError>>,
}

#[derive(Debug, Deserialize)]
struct BackendFieldError {
    #[serde(default)]
    field: String,
    #[serde(default)]
    error: String,
}

impl From<ValidateResponse> for ValidationOutcome {
    fn from(response: ValidateResponse) -> Self {
        ValidationOutcome {
            valid: response.is_valid.unwrap_or(false),
            errors: response
                .errors
                .unwrap_or_default()
                .into_iter()
                .map(|e| FieldError {
                    path: e.field,
                    message: e.error,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct FixPayload<'a> {
    json_to_fix: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct FixResponse {
    #[serde(default)]
    fixed_json: Option<String>,
}

impl BackendClient {
    /// Validate a JSON document against one operation of an OpenAPI schema.
    ///
    /// Blank fields are rejected locally without a request, in the order
    /// schema, operation id, JSON.
    pub async fn validate(&self, request: &ValidationRequest) -> ApiResult<ValidationOutcome> {
        validate_request(request)?;

        let payload = ValidatePayload {
            open_api_spec: &request.open_api_spec_text,
            json_string: &request.json_string,
            operation_id: &request.operation_id,
        };
        debug!(operation_id = %request.operation_id, "Submitting validation request");

        let builder = self.request(Method::POST, "/validator/validate").json(&payload);
        let response: ValidateResponse =
            Self::send_json(builder, ERROR_FIELD, "Validation failed").await?;
        let outcome = ValidationOutcome::from(response);

        info!(
            operation_id = %request.operation_id,
            valid = outcome.valid,
            errors = outcome.errors.len(),
            "Validation completed"
        );
        Ok(outcome)
    }

    /// Ask the backend to repair malformed JSON. Returns the repaired text,
    /// empty when the backend sent none.
    pub async fn fix_json(&self, json: &str) -> ApiResult<String> {
        validate_fix_input(json)?;

        let builder = self
            .request(Method::POST, "/repair/fix-json")
            .json(&FixPayload { json_to_fix: json });
        let response: FixResponse =
            Self::send_json(builder, ERROR_FIELD, "Failed to fix JSON").await?;

        debug!("JSON repair completed");
        Ok(response.fixed_json.unwrap_or_default())
    }
}
