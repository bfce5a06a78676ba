//! Browser `localStorage` backend (WASM only)

use tracing::warn;

use super::SessionStorage;

/// Storage backed by `window.localStorage`.
///
/// When no window or storage is available (workers, privacy modes that
/// disable storage) every read is `None` and every write is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

// The storage handle is fetched per call; no JS value is held.
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::local_storage()
            && storage.set_item(key, value).is_err()
        {
            warn!(key = key, "localStorage rejected write");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
