//! Request credentials

/// Header carrying an API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// How a request authenticates itself
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// No authentication header
    #[default]
    Anonymous,
    /// `Authorization: Bearer <access token>` from a signed-in session
    Bearer(String),
    /// `X-API-Key: <key>` for programmatic access
    ApiKey(String),
}

impl Credential {
    /// Header name and value to attach, if any
    pub fn header(&self) -> Option<(&'static str, String)> {
        match self {
            Credential::Anonymous => None,
            Credential::Bearer(token) => Some(("Authorization", format!("Bearer {}", token))),
            Credential::ApiKey(key) => Some((API_KEY_HEADER, key.clone())),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credential::Anonymous)
    }
}

// Secrets stay out of logs and panic messages.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Anonymous => write!(f, "Anonymous"),
            Credential::Bearer(_) => write!(f, "Bearer(<redacted>)"),
            Credential::ApiKey(_) => write!(f, "ApiKey(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        assert_eq!(Credential::Anonymous.header(), None);
        assert_eq!(
            Credential::Bearer("abc".into()).header(),
            Some(("Authorization", "Bearer abc".to_string()))
        );
        assert_eq!(
            Credential::ApiKey("k-1".into()).header(),
            Some(("X-API-Key", "k-1".to_string()))
        );
    }

    #[test]
    fn test_debug_redacts() {
        let debug = format!("{:?}", Credential::Bearer("secret-token".into()));
        assert!(!debug.contains("secret-token"));
    }
}
