//! Input validation for outbound requests.
//!
//! Every check here runs before any network call. A failure is terminal for
//! that submission: the caller shows the message inline and nothing is sent
//! to the backend.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ValidationRequest, WaitlistEntry};

/// Maximum size for OpenAPI specification text (5MB)
pub const MAX_OPENAPI_TEXT_SIZE: usize = 5 * 1024 * 1024;

/// Maximum length for API key names
pub const MAX_API_KEY_NAME_LENGTH: usize = 255;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    /// A required value is missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input has invalid format
    #[error("Please enter a valid {0}")]
    InvalidFormat(&'static str),

    /// OAuth callback arrived without `code` or `state`
    #[error("Missing authentication parameters")]
    MissingAuthParameters,
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(value: &str, field: &'static str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Validate a validation submission.
///
/// Checks run in the order the form reports them: schema, then operation
/// id, then the JSON payload.
///
/// # Examples
///
/// ```
/// use marshal_sdk::models::ValidationRequest;
/// use marshal_sdk::validation::input::validate_request;
///
/// let req = ValidationRequest::new("{}", "openapi: 3.1.0", "listP");
/// assert!(validate_request(&req).is_ok());
///
/// let req = ValidationRequest::new("{}", "openapi: 3.1.0", "  ");
/// assert_eq!(validate_request(&req).unwrap_err().to_string(), "Operation ID is required");
/// ```
pub fn validate_request(request: &ValidationRequest) -> ValidationResult<()> {
    require(&request.open_api_spec_text, "OpenAPI schema")?;
    validate_openapi_text_size(request.open_api_spec_text.len())?;
    require(&request.operation_id, "Operation ID")?;
    require(&request.json_string, "JSON input")?;
    Ok(())
}

/// Validate a fix-json submission.
pub fn validate_fix_input(json: &str) -> ValidationResult<()> {
    require(json, "JSON input")
}

/// Validate a waitlist signup.
///
/// # Examples
///
/// ```
/// use marshal_sdk::models::WaitlistEntry;
/// use marshal_sdk::validation::input::validate_waitlist_entry;
///
/// assert!(validate_waitlist_entry(&WaitlistEntry::new("Ada", "ada@example.com")).is_ok());
/// assert!(validate_waitlist_entry(&WaitlistEntry::new("Ada", "ada@example")).is_err());
/// ```
pub fn validate_waitlist_entry(entry: &WaitlistEntry) -> ValidationResult<()> {
    require(&entry.name, "Name")?;
    validate_email(&entry.email)
}

/// Validate an email address with the same loose pattern the signup form uses.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat("email"))
    }
}

/// Validate a name for a new API key.
pub fn validate_api_key_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    require(name, "API key name")?;
    if name.len() > MAX_API_KEY_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "API key name",
            max: MAX_API_KEY_NAME_LENGTH,
            actual: name.len(),
        });
    }
    Ok(())
}

/// Validate the query parameters of an OAuth callback.
pub fn validate_login_callback(code: &str, state: &str) -> ValidationResult<()> {
    if code.trim().is_empty() || state.trim().is_empty() {
        return Err(ValidationError::MissingAuthParameters);
    }
    Ok(())
}

/// Validate size for OpenAPI specification text.
pub fn validate_openapi_text_size(size: usize) -> ValidationResult<()> {
    if size > MAX_OPENAPI_TEXT_SIZE {
        return Err(ValidationError::TooLong {
            field: "OpenAPI schema",
            max: MAX_OPENAPI_TEXT_SIZE,
            actual: size,
        });
    }
    Ok(())
}
