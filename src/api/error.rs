//! Error types for backend calls

use thiserror::Error;

use crate::validation::ValidationError;

/// Text shown to users when the backend cannot be reached
pub const NETWORK_FAILURE_MESSAGE: &str = "Internal server error";

/// Text shown to users when a 2xx body is missing required fields
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Errors returned by backend operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected locally; no request was sent
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Non-2xx response from the backend
    #[error("Backend returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response whose body could not be used
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Call requires a signed-in session
    #[error("Not authenticated")]
    Unauthenticated,
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message suitable for display next to the form that triggered the call
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Invalid(e) => e.to_string(),
            ApiError::Remote { message, .. } => message.clone(),
            ApiError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            ApiError::UnexpectedResponse(_) => INVALID_RESPONSE_MESSAGE.to_string(),
            ApiError::Unauthenticated => "Please sign in to continue".to_string(),
        }
    }

    /// HTTP status of a remote failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller should be sent back to the login page
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthenticated | ApiError::Remote { status: 401, .. }
        )
    }
}

#[cfg(feature = "api-backend")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::UnexpectedResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pick the human-readable error out of a non-2xx body.
///
/// The backend puts it under `field` (`error` for most routes, `message` for
/// the waitlist). Anything else, including a non-JSON body, gives `fallback`.
pub fn remote_error_message(body: &str, field: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get(field))
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
