//! Waitlist signup command

use crate::cli::commands::{CliContext, runtime};
use crate::cli::error::CliError;
use crate::models::WaitlistEntry;

/// Handle the waitlist command
pub fn handle_waitlist(ctx: &CliContext, entry: &WaitlistEntry) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(ctx.client.join_waitlist(entry))?;
    println!("You're on the list! We'll be in touch at {}.", entry.email);
    Ok(())
}
