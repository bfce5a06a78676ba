//! User profile structures
//!
//! The profile is a snapshot returned by the backend at login time. It is
//! stored as-is and never re-validated locally.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account email
    pub email: String,
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Any other fields the backend sends, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Create a profile with only an email
    pub fn new(email: impl Into<String>) -> Self {
        UserProfile {
            email: email.into(),
            first_name: None,
            last_name: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Set the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Name to greet the user with, falling back to the email
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Body of `GET /auth/google/callback`
///
/// Every field is optional on the wire; the session manager rejects the
/// response unless all three are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCallback {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let json = r#"{"email":"a@b.co","first_name":"Ada","plan":"pro"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.extra.get("plan").and_then(|v| v.as_str()), Some("pro"));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["plan"], "pro");
        assert!(back.get("last_name").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile = UserProfile::new("a@b.co");
        assert_eq!(profile.display_name(), "a@b.co");
        let profile = profile.with_first_name("Ada");
        assert_eq!(profile.display_name(), "Ada");
    }
}
