//! File-backed storage
//!
//! Native counterpart of browser `localStorage`: all keys live in one JSON
//! object on disk, rewritten on every change, so a session survives process
//! restarts.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use super::SessionStorage;

/// Default file name for persisted sessions
pub const DEFAULT_SESSION_FILENAME: &str = ".marshal-session.json";

/// Storage persisted as a JSON object in a single file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, loading existing values.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty and is overwritten on the next change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Failed to create session directory");
            return;
        }

        let content = match serde_json::to_string_pretty(values) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Failed to serialize session storage");
                return;
            }
        };

        if let Err(e) = write_private(&self.path, content.as_bytes()) {
            warn!(path = %self.path.display(), error = %e, "Failed to write session file");
        }
    }
}

/// Sibling path used while rewriting `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_SESSION_FILENAME));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `content`. On unix the file is owner-only from the
/// moment it exists; readers see either the old or the new content.
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let staging = staging_path(path);
    match std::fs::remove_file(&staging) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = options.open(&staging).and_then(|mut file| {
        // mode() is filtered by the umask; pin it before any byte lands
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content)?;
        file.sync_all()
    });

    match result.and_then(|()| std::fs::rename(&staging, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = std::fs::remove_file(&staging);
            Err(e)
        }
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read session file");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
        BTreeMap::new()
    })
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock();
        if values.remove(key).is_some() {
            self.persist(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_SESSION_FILENAME);

        let storage = FileStorage::open(&path);
        storage.set("access_token", "a1");
        storage.set("refresh_token", "r1");
        storage.remove("refresh_token");
        assert!(path.exists());

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get("access_token").as_deref(), Some("a1"));
        assert_eq!(reopened.get("refresh_token"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SESSION_FILENAME);
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get("access_token"), None);

        storage.set("access_token", "a2");
        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get("access_token").as_deref(), Some("a2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SESSION_FILENAME);
        let storage = FileStorage::open(&path);

        storage.set("access_token", "a1");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!staging_path(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SESSION_FILENAME);
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileStorage::open(&path);
        storage.set("refresh_token", "r1");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            FileStorage::open(&path).get("refresh_token").as_deref(),
            Some("r1")
        );
    }

    #[test]
    fn test_stale_staging_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SESSION_FILENAME);
        std::fs::write(staging_path(&path), "leftover").unwrap();

        let storage = FileStorage::open(&path);
        storage.set("access_token", "a1");
        assert!(!staging_path(&path).exists());
        assert_eq!(
            FileStorage::open(&path).get("access_token").as_deref(),
            Some("a1")
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("absent.json"));
        assert_eq!(storage.get("user"), None);
        assert_eq!(storage.path(), dir.path().join("absent.json"));
    }
}
