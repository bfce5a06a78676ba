//! Dashboard structures: API keys and usage counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: u64 = 1000 * 60 * 60 * 24;

/// An API key as listed on the dashboard (the secret is never listed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    /// Remaining lifetime in milliseconds, `0` means the key never expires
    #[serde(default)]
    pub expires_in_ms: u64,
}

impl ApiKey {
    /// Whole days until expiry, `None` for keys that never expire
    pub fn expires_in_days(&self) -> Option<u64> {
        expiry_days(self.expires_in_ms)
    }
}

/// A freshly created API key; `key` holds the secret and is shown once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedApiKey {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub key: String,
    #[serde(default)]
    pub expires_in_ms: u64,
}

impl CreatedApiKey {
    pub fn expires_in_days(&self) -> Option<u64> {
        expiry_days(self.expires_in_ms)
    }
}

fn expiry_days(expires_in_ms: u64) -> Option<u64> {
    if expires_in_ms == 0 {
        None
    } else {
        Some(expires_in_ms / MS_PER_DAY)
    }
}

/// Monthly quota counters from `GET /api-keys/usage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub allocated_monthly_calls: u64,
    #[serde(default)]
    pub quota_used: u64,
    #[serde(default)]
    pub remaining_calls: u64,
    /// Epoch milliseconds of the last counted call, `0` when never used
    #[serde(default)]
    pub last_updated_at_in_ms: i64,
}

impl UsageStats {
    /// Share of the monthly allocation already used, in percent
    pub fn quota_percent(&self) -> f64 {
        if self.allocated_monthly_calls == 0 {
            return 0.0;
        }
        self.quota_used as f64 / self.allocated_monthly_calls as f64 * 100.0
    }

    /// Time of the last counted call
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        if self.last_updated_at_in_ms <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.last_updated_at_in_ms)
    }
}
