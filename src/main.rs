//! erpdata - ERP test data toolkit
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::Parser;

use erpdata::cli::{Cli, CommandContext, OutputFormat};
use erpdata::core::env::{ProcessEnv, SharedEnv};
use erpdata::core::logging::{self, LogSettings};
use erpdata::render::{error::render_error, human};
use erpdata::storage::config::ResolvedConfig;
use erpdata::util::env::should_use_color;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal; variables may come from the shell or CI.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let env: SharedEnv = ProcessEnv::shared();

    logging::init(&LogSettings::resolve(
        cli.log_level.as_deref(),
        cli.json_output,
        cli.verbose,
        env.as_ref(),
    ));
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to load .env"),
    }

    let format = cli.effective_format();

    let config = match ResolvedConfig::resolve(&cli, env.as_ref()) {
        Ok(config) => config,
        Err(e) => return fail(&e, format, cli.pretty),
    };
    human::set_color(should_use_color(config.no_color, env.as_ref()));

    let Some(command) = cli.command else {
        print_quickstart();
        return ExitCode::SUCCESS;
    };

    let pretty = config.pretty;
    let ctx = CommandContext::new(config, env, format);
    match erpdata::cli::run(command, &ctx).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => fail(&e, format, pretty),
    }
}

fn fail(error: &erpdata::DataError, format: OutputFormat, pretty: bool) -> ExitCode {
    tracing::error!(code = error.error_code(), "{error}");
    eprintln!("{}", render_error(error, format, pretty));
    ExitCode::from(error.exit_code() as u8)
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r#"erpdata - ERP test data toolkit

Resolve fixtures, select credentials, synthesize and validate records.

USAGE:
    erpdata [OPTIONS] <COMMAND>

COMMANDS:
    env check       Report missing environment variables
    fixture         Show or list fixture files
    credentials     Show the credentials selected for a role
    generate        Generate users, products or login data
    validate        Validate user or product records

QUICK START:
    erpdata env check
    erpdata fixture show user-management-data --key departments
    erpdata credentials manager
    erpdata generate user --count 5 --department Operations
    erpdata validate user users.json

ROBOT MODE:
    erpdata generate product --count 3 --json

For more help: erpdata --help
"#
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
