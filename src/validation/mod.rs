//! Validation functionality
//!
//! Provides the client-side checks that gate every outbound submission.

pub mod input;

pub use input::{
    ValidationError, ValidationResult, validate_api_key_name, validate_email,
    validate_fix_input, validate_login_callback, validate_openapi_text_size, validate_request,
    validate_waitlist_entry,
};
