//! Tests for `.marshal.toml` handling

use marshal_sdk::config::{CONFIG_FILENAME, ClientConfig, DEFAULT_BACKEND_URL, sample_config};
use tempfile::tempdir;

#[test]
fn test_sample_config_roundtrip_through_disk() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILENAME), sample_config()).unwrap();

    let content = std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
    let config = ClientConfig::parse(&content).unwrap();
    assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL);
    assert_eq!(config.api_key(), None);
}

#[test]
fn test_to_toml_contains_sections() {
    let config = ClientConfig::new()
        .with_backend_url("https://api.marshal.dev")
        .with_session_file("/tmp/marshal-session.json");
    let toml = config.to_toml().unwrap();
    assert!(toml.contains("[backend]"));
    assert!(toml.contains("https://api.marshal.dev"));
    assert!(toml.contains("[session]"));
    assert!(!toml.contains("api_key"));
}

#[test]
fn test_blank_url_falls_back_to_default() {
    let config = ClientConfig::parse("[backend]\nurl = \"  \"\n").unwrap();
    assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL);
}

#[cfg(feature = "api-backend")]
#[test]
fn test_client_from_config() {
    use marshal_sdk::api::{BackendClient, Credential};

    let config = ClientConfig::parse("[backend]\nurl = \"https://api.marshal.dev/\"\n").unwrap();
    let client = BackendClient::from_config(&config);
    assert_eq!(client.base_url(), "https://api.marshal.dev");
    assert_eq!(client.credential(), &Credential::Anonymous);
}
