//! `env check` implementation.

use serde::Serialize;

use crate::cli::CommandContext;
use crate::cli::args::EnvCommand;
use crate::core::fixtures::FixtureKind;
use crate::error::{ExitCode, Result};
use crate::render::human;
use crate::storage::config::{ConfigSources, EnvironmentReport};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvCheck<'a> {
    #[serde(flatten)]
    report: &'a EnvironmentReport,
    environment: String,
    base_url: &'a str,
    api_url: &'a str,
    email_domain: &'a str,
    data_dir: String,
    timeout_ms: u128,
    sources: &'a ConfigSources,
    unset_placeholders: Vec<FixturePlaceholders>,
}

#[derive(Serialize)]
struct FixturePlaceholders {
    fixture: String,
    variables: Vec<String>,
}

/// Execute an `env` subcommand.
///
/// # Errors
///
/// Fixture errors for names passed with `--fixture`.
pub async fn execute(cmd: &EnvCommand, ctx: &CommandContext) -> Result<ExitCode> {
    let EnvCommand::Check { fixture } = cmd;
    let report = EnvironmentReport::check(ctx.env.as_ref());
    tracing::debug!(missing = ?report.missing_vars, "Environment checked");

    let loader = ctx.loader();
    let mut unset = Vec::new();
    for name in fixture {
        let kind = if loader.exists(name, FixtureKind::Json).await {
            FixtureKind::Json
        } else {
            FixtureKind::Csv
        };
        let variables = loader.unset_placeholders(name, kind).await?;
        unset.push(FixturePlaceholders {
            fixture: name.clone(),
            variables,
        });
    }

    let config = &ctx.config;
    let check = EnvCheck {
        report: &report,
        environment: config.environment.to_string(),
        base_url: &config.base_url,
        api_url: &config.api_url,
        email_domain: &config.email_domain,
        data_dir: config.data_dir.display().to_string(),
        timeout_ms: config.timeout.as_millis(),
        sources: &config.sources,
        unset_placeholders: unset,
    };

    ctx.emit("env check", &check, |check| {
        let unresolved: Vec<(String, Vec<String>)> = check
            .unset_placeholders
            .iter()
            .map(|f| (f.fixture.clone(), f.variables.clone()))
            .collect();
        Ok(human::render_env_report(check.report, config, &unresolved))
    })?;

    Ok(if report.is_valid {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}
