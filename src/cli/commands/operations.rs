//! List the operations of an OpenAPI schema

use crate::cli::commands::load_input;
use crate::cli::error::CliError;
use crate::schema::SchemaResolver;

/// Handle the operations command
pub fn handle_operations(input: &str, json: bool) -> Result<(), CliError> {
    let content = load_input(input)?;
    let resolver = SchemaResolver::with_text(content);

    if json {
        let output = serde_json::to_string_pretty(resolver.operations())
            .map_err(|e| CliError::IoError(format!("Failed to serialize operations: {}", e)))?;
        println!("{}", output);
    } else {
        for op in resolver.operations() {
            println!("{:<24} {}", op.id, op.label());
        }
    }

    if let Some(hint) = resolver.hint() {
        eprintln!("{}", hint);
    }
    Ok(())
}
