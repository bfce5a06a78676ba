//! Backend API access
//!
//! Error and credential types are always available; the HTTP client and its
//! endpoint methods need the `api-backend` feature.

pub mod credential;
pub mod error;

#[cfg(feature = "api-backend")]
pub mod account;
#[cfg(feature = "api-backend")]
pub mod client;
#[cfg(feature = "api-backend")]
pub mod validator;
#[cfg(feature = "api-backend")]
pub mod waitlist;

#[cfg(feature = "api-backend")]
pub use client::BackendClient;
pub use credential::{API_KEY_HEADER, Credential};
pub use error::{
    ApiError, ApiResult, INVALID_RESPONSE_MESSAGE, NETWORK_FAILURE_MESSAGE, remote_error_message,
};
