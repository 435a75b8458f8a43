//! `generate` command implementation.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::CommandContext;
use crate::cli::args::{GenerateCommand, GenerateProductArgs, GenerateUserArgs};
use crate::core::credentials::CredentialSelector;
use crate::core::factory::{
    LoginKind, UserFactory, edge_case_products, filter_test_data, generate_for_business,
    generate_invalid_product, generate_login_data, generate_product,
};
use crate::core::models::{ProductOverrides, UserOverrides};
use crate::error::{DataError, ExitCode, Result};
use crate::render::human;

/// Execute a `generate` subcommand.
///
/// # Errors
///
/// Fixture, credential and synthesis errors, or malformed `--overrides`.
pub async fn execute(cmd: &GenerateCommand, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        GenerateCommand::User(args) => users(args, ctx).await,
        GenerateCommand::Product(args) => products(args, ctx).await,
        GenerateCommand::Login { invalid } => {
            let kind = if *invalid {
                LoginKind::Invalid
            } else {
                LoginKind::Valid
            };
            let login = generate_login_data(kind, &CredentialSelector::new(ctx.env.clone()))?;
            ctx.emit("generate login", &login, |login| human::render_records(login))?;
            Ok(ExitCode::Success)
        }
    }
}

async fn users(args: &GenerateUserArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let factory = UserFactory::new(ctx.catalog(), ctx.config.email_domain.clone());
    let overrides: UserOverrides = parse_overrides(args.overrides.as_deref())?;

    let mut records = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let record = if let Some(kind) = args.invalid {
            factory.generate_invalid_user(kind.into()).await?
        } else if let Some(department) = &args.department {
            factory.generate_user_for_department(department).await?
        } else {
            factory.generate_user(overrides.clone()).await?
        };
        records.push(record);
    }
    tracing::debug!(count = records.len(), "Generated users");

    finish(ctx, "generate user", &records, args.save.as_deref()).await
}

async fn products(args: &GenerateProductArgs, ctx: &CommandContext) -> Result<ExitCode> {
    if args.filter_cases {
        let data = filter_test_data();
        ctx.emit("generate product", &data, |data| human::render_records(data))?;
        return Ok(ExitCode::Success);
    }
    let overrides: ProductOverrides = parse_overrides(args.overrides.as_deref())?;

    let records = if args.edge_cases {
        edge_case_products()
    } else {
        (0..args.count)
            .map(|_| {
                if let Some(kind) = args.invalid {
                    generate_invalid_product(kind.into())
                } else if let Some(business) = args.business {
                    generate_for_business(business.into())
                } else {
                    generate_product(overrides.clone())
                }
            })
            .collect()
    };
    tracing::debug!(count = records.len(), "Generated products");

    finish(ctx, "generate product", &records, args.save.as_deref()).await
}

/// Optionally persist, then print.
async fn finish<T: Serialize>(
    ctx: &CommandContext,
    command: &str,
    records: &[T],
    save: Option<&str>,
) -> Result<ExitCode> {
    if let Some(name) = save {
        let path = ctx.loader().write_json(name, records).await?;
        tracing::info!(path = %path.display(), "Saved generated records");
    }
    ctx.emit(command, records, |records| human::render_records(records))?;
    Ok(ExitCode::Success)
}

/// Parse `--overrides` JSON; absent means no overrides.
fn parse_overrides<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T> {
    raw.map_or_else(
        || Ok(T::default()),
        |raw| {
            serde_json::from_str(raw)
                .map_err(|e| DataError::Config(format!("Invalid --overrides JSON: {e}")))
        },
    )
}
