//! CLI-specific error types

use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Not signed in. Run `marshal-cli login-url` to start a session.")]
    NotSignedIn,

    #[error("Session expired. Sign in again.")]
    SessionExpired,

    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),
}

impl CliError {
    /// Route API auth failures to the sign-in hint
    pub fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated => CliError::NotSignedIn,
            other => CliError::Api(other),
        }
    }
}
