//! `validate` command implementation.

use std::path::Path;

use serde_json::Value;

use crate::cli::CommandContext;
use crate::cli::args::{RecordArg, ValidateArgs};
use crate::core::validation::{RecordValidator, ValidationResult};
use crate::error::{DataError, ExitCode, Result};
use crate::render::human;

/// Execute the validate command.
///
/// Exits with [`ExitCode::ValidationFailed`] when any record is invalid.
///
/// # Errors
///
/// Unreadable or non-JSON input files, or an unreadable department fixture.
pub async fn execute(args: &ValidateArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let records = read_records(&args.file).await?;
    let validator = RecordValidator::new(ctx.catalog(), ctx.config.email_domain.clone())
        .with_required_user_fields(ctx.config.required_user_fields.clone());

    let mut results = Vec::with_capacity(records.len());
    for record in &records {
        let result = match args.record {
            RecordArg::User => validator.validate_user(record).await?,
            RecordArg::Product => validator.validate_product(record),
        };
        results.push(result);
    }

    ctx.emit("validate", &results, |results| Ok(human::render_validation(results)))?;

    Ok(if results.iter().all(|r: &ValidationResult| r.is_valid) {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}

/// One object or an array of objects.
async fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DataError::FixtureNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let parse_error = |message: String| DataError::FixtureParse {
        path: path.display().to_string(),
        message,
    };

    match serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))? {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        _ => Err(parse_error("expected a JSON object or array".to_string())),
    }
}
