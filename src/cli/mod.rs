//! Command-line interface support
//!
//! The `marshal-cli` binary in `main.rs` parses arguments and dispatches to
//! the handlers in [`commands`].

pub mod commands;
pub mod error;
