//! Session lifecycle
//!
//! [`SessionManager`] is the single owner of the signed-in state: the access
//! token, the refresh token and the user profile. It persists them through a
//! [`SessionStorage`], talks to the backend through an [`AuthBackend`] and
//! tells registered observers whenever the signed-in state changes.
//!
//! Tokens are never logged.

pub mod backend;
#[cfg(feature = "api-backend")]
pub mod http;
pub mod observers;

pub use backend::{AuthBackend, RefreshResponse};
#[cfg(feature = "api-backend")]
pub use http::HttpAuthBackend;
pub use observers::{ObserverRegistry, Subscription};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::api::{ApiError, ApiResult, Credential};
use crate::models::UserProfile;
use crate::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionStorage, USER_KEY};
use crate::validation::validate_login_callback;

/// Owns the client-side session.
pub struct SessionManager<S, B> {
    storage: S,
    backend: B,
    observers: ObserverRegistry,
    // Bumped whenever the session is replaced or cleared. A refresh that
    // started under an older generation must not write its result. Held for
    // the whole of every token write so a check and its write cannot be
    // split by a concurrent clear.
    generation: Mutex<u64>,
}

impl<S: SessionStorage, B: AuthBackend> SessionManager<S, B> {
    /// Create a manager over existing storage. A session persisted by an
    /// earlier run is picked up as-is.
    pub fn new(storage: S, backend: B) -> Self {
        SessionManager {
            storage,
            backend,
            observers: ObserverRegistry::new(),
            generation: Mutex::new(0),
        }
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store a fresh token pair and notify observers.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) {
        {
            let mut generation = self.generation.lock();
            *generation += 1;
            self.storage.set(ACCESS_TOKEN_KEY, access_token);
            self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
        }
        self.observers.notify();
    }

    /// Store the user profile. Observers are not notified.
    pub fn set_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user profile"),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Stored profile; a value that no longer deserializes reads as absent
    pub fn user(&self) -> Option<UserProfile> {
        let json = self.read(USER_KEY)?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Ignoring unreadable stored user profile");
                None
            }
        }
    }

    /// Whether an access token is present. Expiry is not checked.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Credential for dashboard calls, `None` when signed out
    pub fn credential(&self) -> Option<Credential> {
        self.access_token().map(Credential::Bearer)
    }

    /// Remove tokens and profile, then notify observers. Safe to call when
    /// already signed out.
    pub fn clear_auth(&self) {
        self.clear_locked(&mut self.generation.lock());
        self.observers.notify();
    }

    fn clear_locked(&self, generation: &mut u64) {
        *generation += 1;
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Register a callback run after every `set_tokens` and `clear_auth`.
    pub fn on_auth_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Obtain a new access token with the stored refresh token.
    ///
    /// Returns `None` without a network call when there is no refresh token.
    /// Any failure signs the user out. A successful response without an
    /// access token leaves the session untouched. If the session was
    /// replaced or cleared while the request was in flight, the result is
    /// dropped.
    pub async fn refresh_access_token(&self) -> Option<String> {
        let (refresh_token, started) = {
            let generation = self.generation.lock();
            (self.refresh_token()?, *generation)
        };

        let result = self.backend.refresh(&refresh_token).await;

        let mut generation = self.generation.lock();
        if *generation != started {
            debug!("Session changed during token refresh; discarding result");
            return None;
        }

        match result {
            Ok(response) => match response.access_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    self.storage.set(ACCESS_TOKEN_KEY, &token);
                    debug!("Access token refreshed");
                    Some(token)
                }
                None => {
                    warn!("Refresh response did not contain an access token");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Token refresh failed; signing out");
                self.clear_locked(&mut generation);
                drop(generation);
                self.observers.notify();
                None
            }
        }
    }

    /// Sign out. The backend is told on a best-effort basis; local state is
    /// always cleared.
    pub async fn logout(&self) {
        if let Some(access_token) = self.access_token()
            && let Err(e) = self.backend.logout(&access_token).await
        {
            warn!(error = %e, "Logout request failed; clearing local session anyway");
        }
        self.clear_auth();
    }

    /// URL to send the user to for Google sign-in
    pub async fn login_url(&self) -> ApiResult<String> {
        self.backend.login_url().await
    }

    /// Finish the OAuth redirect: exchange `code` and `state` for a session,
    /// store it and return the signed-in profile.
    pub async fn complete_login(&self, code: &str, state: &str) -> ApiResult<UserProfile> {
        validate_login_callback(code, state)?;

        let callback = self.backend.exchange_code(code, state).await?;
        let (Some(access_token), Some(refresh_token), Some(user)) = (
            callback.access_token.filter(|t| !t.is_empty()),
            callback.refresh_token.filter(|t| !t.is_empty()),
            callback.user,
        ) else {
            return Err(ApiError::UnexpectedResponse(
                "login callback is missing tokens or user".to_string(),
            ));
        };

        self.set_tokens(&access_token, &refresh_token);
        self.set_user(&user);
        info!("Login completed");
        Ok(user)
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|value| !value.is_empty())
    }
}

impl<S, B> std::fmt::Debug for SessionManager<S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("observers", &self.observers)
            .field("generation", &*self.generation.lock())
            .finish_non_exhaustive()
    }
}
