//! Sign-in and session commands

use tracing::info;

use crate::cli::commands::{CliContext, runtime};
use crate::cli::error::CliError;

/// Print the Google sign-in URL
pub fn handle_login_url(ctx: &CliContext) -> Result<(), CliError> {
    let rt = runtime()?;
    let url = rt.block_on(ctx.session.login_url())?;
    println!("{}", url);
    eprintln!("Open the URL, then run `marshal-cli login --code <code> --state <state>`");
    Ok(())
}

/// Complete sign-in with the parameters from the OAuth redirect
pub fn handle_login(ctx: &CliContext, code: &str, state: &str) -> Result<(), CliError> {
    let rt = runtime()?;
    let user = rt.block_on(ctx.session.complete_login(code, state))?;
    println!("Signed in as {} <{}>", user.display_name(), user.email);
    Ok(())
}

/// Sign out
pub fn handle_logout(ctx: &CliContext) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(ctx.session.logout());
    println!("Signed out");
    Ok(())
}

/// Exchange the refresh token for a new access token
pub fn handle_refresh(ctx: &CliContext) -> Result<(), CliError> {
    if ctx.session.refresh_token().is_none() {
        return Err(CliError::NotSignedIn);
    }
    let rt = runtime()?;
    match rt.block_on(ctx.session.refresh_access_token()) {
        Some(_) => {
            info!("Session refreshed from CLI");
            println!("Access token refreshed");
            Ok(())
        }
        None if ctx.session.is_authenticated() => {
            println!("Backend returned no new token; session unchanged");
            Ok(())
        }
        None => Err(CliError::SessionExpired),
    }
}

/// Show who is signed in
pub fn handle_whoami(ctx: &CliContext) -> Result<(), CliError> {
    if !ctx.session.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    match ctx.session.user() {
        Some(user) => {
            let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if full_name.is_empty() {
                println!("{}", user.email);
            } else {
                println!("{} <{}>", full_name, user.email);
            }
        }
        None => println!("Signed in (no profile stored)"),
    }
    Ok(())
}
