//! Models module for the SDK
//!
//! Defines the data structures shared by the session manager, the schema
//! resolver and the backend client. Wire names follow the Marshal backend
//! (`snake_case`), Rust names follow Rust conventions.

pub mod account;
pub mod operation;
pub mod user;
pub mod validation;

pub use account::{ApiKey, CreatedApiKey, UsageStats};
pub use operation::{Operation, SchemaFormat};
pub use user::{LoginCallback, UserProfile};
pub use validation::{FieldError, ValidationOutcome, ValidationRequest, WaitlistEntry};
