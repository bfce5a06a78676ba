//! API key and usage commands

use crate::cli::commands::{CliContext, runtime};
use crate::cli::error::CliError;
use crate::models::ApiKey;

fn expiry(key_expires_in_days: Option<u64>) -> String {
    match key_expires_in_days {
        None => "never".to_string(),
        Some(0) => "in less than a day".to_string(),
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{} days", days),
    }
}

fn format_key(key: &ApiKey) -> String {
    format!("{:<38} {:<24} expires: {}", key.id, key.name, expiry(key.expires_in_days()))
}

/// List API keys
pub fn handle_keys_list(ctx: &CliContext) -> Result<(), CliError> {
    let rt = runtime()?;
    let keys = rt.block_on(ctx.as_user(|client| async move { client.list_api_keys().await }))?;
    if keys.is_empty() {
        println!("No API keys");
    }
    for key in &keys {
        println!("{}", format_key(key));
    }
    Ok(())
}

/// Create an API key and print its secret
pub fn handle_keys_create(ctx: &CliContext, name: &str) -> Result<(), CliError> {
    let rt = runtime()?;
    let created = rt.block_on(ctx.as_user(|client| {
        let name = name.to_string();
        async move { client.create_api_key(&name).await }
    }))?;
    println!("{}", created.key);
    eprintln!(
        "Copy this key now; it will not be shown again (expires: {})",
        expiry(created.expires_in_days())
    );
    Ok(())
}

/// Revoke an API key
pub fn handle_keys_revoke(ctx: &CliContext, id: &str) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(ctx.as_user(|client| {
        let id = id.to_string();
        async move { client.revoke_api_key(&id).await }
    }))?;
    println!("Revoked {}", id);
    Ok(())
}

/// Show monthly quota usage
pub fn handle_usage(ctx: &CliContext) -> Result<(), CliError> {
    let rt = runtime()?;
    let stats = rt.block_on(ctx.as_user(|client| async move { client.usage().await }))?;
    println!(
        "{} of {} calls used ({:.1}%), {} remaining",
        stats.quota_used,
        stats.allocated_monthly_calls,
        stats.quota_percent(),
        stats.remaining_calls
    );
    if let Some(updated) = stats.last_updated_at() {
        println!("Last updated: {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_text() {
        assert_eq!(expiry(None), "never");
        assert_eq!(expiry(Some(0)), "in less than a day");
        assert_eq!(expiry(Some(1)), "1 day");
        assert_eq!(expiry(Some(30)), "30 days");
    }
}
