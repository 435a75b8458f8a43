//! `credentials` command implementation.

use serde::Serialize;

use crate::cli::CommandContext;
use crate::cli::args::CredentialsArgs;
use crate::core::credentials::{CredentialSelector, CredentialSource, Role};
use crate::error::{ExitCode, Result};
use crate::render::human;

/// JSON view of a credential lookup. The password is always masked.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialView {
    requested: String,
    role: Role,
    fallback: bool,
    username: String,
    password: String,
}

/// Execute the credentials command.
///
/// # Errors
///
/// [`crate::error::DataError::CredentialsNotConfigured`] when no pair is set.
pub fn execute(args: &CredentialsArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let selector = CredentialSelector::new(ctx.env.clone());
    let (credentials, source) = selector.resolve(&args.role)?;

    let view = CredentialView {
        requested: args.role.clone(),
        role: match source {
            CredentialSource::Role(role) => role,
            CredentialSource::Fallback => Role::Default,
        },
        fallback: source == CredentialSource::Fallback,
        username: credentials.username.clone(),
        password: credentials.masked_password(),
    };

    ctx.emit("credentials", &view, |_| {
        Ok(human::render_credentials(&args.role, &credentials, source))
    })?;
    Ok(ExitCode::Success)
}
