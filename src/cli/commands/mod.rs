//! CLI command implementations

pub mod auth;
pub mod keys;
pub mod operations;
pub mod validate;
pub mod waitlist;

use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::api::{ApiResult, BackendClient};
use crate::cli::error::CliError;
use crate::config::ClientConfig;
use crate::session::{HttpAuthBackend, SessionManager};
use crate::storage::FileStorage;

/// Session type used by the CLI
pub type CliSession = SessionManager<FileStorage, HttpAuthBackend>;

/// Everything a command needs: configuration, the persisted session and a
/// backend client.
pub struct CliContext {
    pub config: ClientConfig,
    pub session: CliSession,
    pub client: BackendClient,
}

impl CliContext {
    /// Load `.marshal.toml` from `config_dir` and open the session file.
    /// `backend_url` overrides both the file and the environment.
    pub fn load(config_dir: &Path, backend_url: Option<String>) -> Result<Self, CliError> {
        let mut config = ClientConfig::load(config_dir)?;
        if let Some(url) = backend_url {
            config.backend.url = url;
        }

        let home = std::env::var_os("HOME").map(PathBuf::from);
        let session_file = config.session_file(home.as_deref());
        debug!(path = %session_file.display(), backend = %config.backend_url(), "Loading CLI context");

        let client = BackendClient::from_config(&config);
        let backend = HttpAuthBackend::from_client(BackendClient::new(config.backend_url()));
        let session = SessionManager::new(FileStorage::open(session_file), backend);

        Ok(CliContext {
            config,
            session,
            client,
        })
    }

    /// Run a dashboard call as the signed-in user.
    ///
    /// A 401 triggers one token refresh and one retry. A failed refresh
    /// ends the session.
    pub async fn as_user<T, F, Fut>(&self, call: F) -> Result<T, CliError>
    where
        F: Fn(BackendClient) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let client = self
            .client
            .authorized(&self.session)
            .map_err(CliError::from_api)?;

        match call(client).await {
            Err(e) if e.is_unauthorized() => {
                debug!("Access token rejected; refreshing");
                if self.session.refresh_access_token().await.is_none() {
                    return Err(CliError::SessionExpired);
                }
                let client = self
                    .client
                    .authorized(&self.session)
                    .map_err(CliError::from_api)?;
                call(client).await.map_err(CliError::from_api)
            }
            other => other.map_err(CliError::from_api),
        }
    }

    /// File the session is persisted to
    pub fn session_file(&self) -> &Path {
        self.session.storage().path()
    }
}

/// Create the async runtime for network commands
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::IoError(format!("Failed to create runtime: {}", e)))
}

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_input_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{"id":1}"#).unwrap();
        assert_eq!(load_input(path.to_str().unwrap()).unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn test_load_input_missing_file() {
        let err = load_input("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CliError::FileReadError(_, _)));
    }

    #[test]
    fn test_context_uses_configured_session_file() {
        let dir = tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        ClientConfig::new()
            .with_backend_url("http://127.0.0.1:9")
            .with_session_file(&session_path)
            .save(dir.path())
            .unwrap();

        let ctx = CliContext::load(dir.path(), None).unwrap();
        assert_eq!(ctx.session_file(), session_path.as_path());
        assert!(!ctx.session.is_authenticated());
    }
}
