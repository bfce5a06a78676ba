//! Session storage backends
//!
//! The session manager persists three string values under fixed keys. This
//! module abstracts where they live so the same session logic runs in a
//! browser (`localStorage`), in a native CLI (a JSON file), in tests (memory)
//! and in server-side code paths that have no client storage at all.
//!
//! Storage never reports errors to its caller: reads of unavailable storage
//! return `None`, writes to it are dropped and logged.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod browser;
pub mod file;
pub mod memory;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use browser::BrowserStorage;
pub use file::FileStorage;
pub use memory::{MemoryStorage, NoopStorage};

use std::sync::Arc;

/// Key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key holding the serialized user profile
pub const USER_KEY: &str = "user";

/// Key-value store backing a session.
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` when unset or when storage is unavailable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str);

    /// Delete a value; deleting a missing key is a no-op
    fn remove(&self, key: &str);
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
