//! Request and response structures for the validator, repair and waitlist endpoints

use serde::{Deserialize, Serialize};

/// One validation submission
///
/// The schema text is sent raw; the backend decides whether it is JSON or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub json_string: String,
    pub open_api_spec_text: String,
    pub operation_id: String,
}

impl ValidationRequest {
    pub fn new(
        json_string: impl Into<String>,
        open_api_spec_text: impl Into<String>,
        operation_id: impl Into<String>,
    ) -> Self {
        ValidationRequest {
            json_string: json_string.into(),
            open_api_spec_text: open_api_spec_text.into(),
            operation_id: operation_id.into(),
        }
    }
}

/// A field-level validation failure in the shape callers display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the offending value
    pub path: String,
    /// Human readable reason
    pub message: String,
}

/// Result of a validation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// A waitlist signup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        rename = "useCase",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub use_case: Option<String>,
}

impl WaitlistEntry {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        WaitlistEntry {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waitlist_entry_wire_names() {
        let mut entry = WaitlistEntry::new("Ada", "ada@example.com");
        entry.use_case = Some("agents".into());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["useCase"], "agents");
        assert!(json.get("company").is_none());
    }
}
