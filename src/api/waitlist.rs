//! Waitlist signup

use reqwest::Method;
use tracing::info;

use super::{ApiResult, BackendClient};
use crate::models::WaitlistEntry;
use crate::validation::validate_waitlist_entry;

/// The waitlist route reports errors under `message`, not `error`
const WAITLIST_ERROR_FIELD: &str = "message";

impl BackendClient {
    /// Join the waitlist. Returns the backend's response body unchanged.
    pub async fn join_waitlist(&self, entry: &WaitlistEntry) -> ApiResult<serde_json::Value> {
        validate_waitlist_entry(entry)?;

        let builder = self
            .anonymous_request(Method::POST, "/api/waitlist")
            .json(entry);
        let body = Self::send_json(builder, WAITLIST_ERROR_FIELD, "Failed to join waitlist").await?;

        info!("Joined waitlist");
        Ok(body)
    }
}
