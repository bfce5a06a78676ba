//! Validate and fix command implementations

use crate::cli::commands::{CliContext, load_input, runtime};
use crate::cli::error::CliError;
use crate::models::ValidationOutcome;
use crate::schema::SchemaResolver;

/// Validate command arguments
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    /// Schema file, or '-' for stdin
    pub schema: String,
    /// JSON payload file, or '-' for stdin
    pub input: String,
    /// Operation to validate against; defaults to the first in the schema
    pub operation: Option<String>,
}

/// Handle the validate command
pub fn handle_validate(ctx: &CliContext, args: &ValidateArgs) -> Result<(), CliError> {
    if args.schema == "-" && args.input == "-" {
        return Err(CliError::InvalidArgument(
            "Schema and JSON input cannot both be read from stdin".to_string(),
        ));
    }

    let mut resolver = SchemaResolver::with_text(load_input(&args.schema)?);
    if let Some(id) = &args.operation
        && !resolver.select(id)
    {
        eprintln!("Operation '{}' not found in schema; sending it as given", id);
    }

    let mut request = resolver.request_for(load_input(&args.input)?);
    if let Some(id) = &args.operation {
        request.operation_id = id.clone();
    } else if let Some(hint) = resolver.hint() {
        eprintln!("{}", hint);
    }

    let rt = runtime()?;
    let outcome = rt.block_on(ctx.client.validate(&request))?;
    report(&outcome)
}

fn report(outcome: &ValidationOutcome) -> Result<(), CliError> {
    if outcome.valid {
        println!("Validation successful");
        return Ok(());
    }
    for error in &outcome.errors {
        println!("{}: {}", error.path, error.message);
    }
    Err(CliError::ValidationFailed(outcome.errors.len()))
}

/// Handle the fix command
pub fn handle_fix(ctx: &CliContext, input: &str) -> Result<(), CliError> {
    let content = load_input(input)?;
    let rt = runtime()?;
    let fixed = rt.block_on(ctx.client.fix_json(&content))?;
    println!("{}", fixed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldError;

    #[test]
    fn test_report_counts_errors() {
        let outcome = ValidationOutcome {
            valid: false,
            errors: vec![FieldError {
                path: "$.price".into(),
                message: "expected number".into(),
            }],
        };
        assert!(matches!(report(&outcome), Err(CliError::ValidationFailed(1))));

        let outcome = ValidationOutcome {
            valid: true,
            errors: vec![],
        };
        assert!(report(&outcome).is_ok());
    }
}
