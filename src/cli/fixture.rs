//! `fixture show` and `fixture list` implementation.

use serde_json::Value;

use crate::cli::CommandContext;
use crate::cli::args::{FixtureCommand, KindArg};
use crate::core::fixtures::FixtureKind;
use crate::error::{DataError, ExitCode, Result};
use crate::render::human;

/// Execute a `fixture` subcommand.
///
/// # Errors
///
/// Fixture loading errors.
pub async fn execute(cmd: &FixtureCommand, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        FixtureCommand::Show {
            name,
            kind,
            sheet,
            key,
        } => show(ctx, name, FixtureKind::from(*kind), sheet.as_deref(), key.as_deref()).await,
        FixtureCommand::List { kind } => list(ctx, *kind).await,
    }
}

async fn show(
    ctx: &CommandContext,
    name: &str,
    kind: FixtureKind,
    sheet: Option<&str>,
    key: Option<&str>,
) -> Result<ExitCode> {
    if key.is_some() && kind != FixtureKind::Json {
        return Err(DataError::Config("--key only applies to JSON fixtures".to_string()));
    }
    if sheet.is_some() && kind != FixtureKind::Xlsx {
        return Err(DataError::Config("--sheet only applies to xlsx fixtures".to_string()));
    }

    let loader = ctx.loader();
    let data = match (kind, key) {
        (FixtureKind::Json, Some(key)) => loader.get_by_key(name, key).await?,
        (FixtureKind::Json, None) => loader.load_json(name).await?,
        (FixtureKind::Csv, _) => Value::from(
            loader
                .load_csv(name)
                .await?
                .into_iter()
                .map(Value::Object)
                .collect::<Vec<_>>(),
        ),
        (FixtureKind::Xlsx, _) => Value::from(
            loader
                .load_excel(name, sheet)
                .await?
                .into_iter()
                .map(Value::Object)
                .collect::<Vec<_>>(),
        ),
    };

    ctx.emit("fixture show", &data, |data| human::render_records(data))?;
    Ok(ExitCode::Success)
}

async fn list(ctx: &CommandContext, kind: Option<KindArg>) -> Result<ExitCode> {
    let kinds: Vec<FixtureKind> =
        kind.map_or_else(|| FixtureKind::ALL.to_vec(), |k| vec![FixtureKind::from(k)]);

    let loader = ctx.loader();
    let mut groups = Vec::with_capacity(kinds.len());
    for kind in kinds {
        groups.push((kind.to_string(), loader.list(kind).await?));
    }

    let data: serde_json::Map<String, Value> = groups
        .iter()
        .map(|(kind, names)| (kind.clone(), Value::from(names.clone())))
        .collect();

    ctx.emit("fixture list", &data, |_| Ok(human::render_fixture_list(&groups)))?;
    Ok(ExitCode::Success)
}
