//! CLI argument parsing and command dispatch.

pub mod args;
pub mod credentials;
pub mod env;
pub mod fixture;
pub mod generate;
pub mod validate;

use serde::Serialize;

pub use args::{Cli, Commands, OutputFormat};

use crate::core::catalog::Catalog;
use crate::core::env::SharedEnv;
use crate::core::fixtures::FixtureLoader;
use crate::error::{ExitCode, Result};
use crate::render::{RobotOutput, render_json};
use crate::storage::config::ResolvedConfig;

/// Everything a command needs: resolved configuration, the environment it
/// reads, and how to print.
#[derive(Clone)]
pub struct CommandContext {
    pub config: ResolvedConfig,
    pub env: SharedEnv,
    pub format: OutputFormat,
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("config", &self.config)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl CommandContext {
    #[must_use]
    pub const fn new(config: ResolvedConfig, env: SharedEnv, format: OutputFormat) -> Self {
        Self {
            config,
            env,
            format,
        }
    }

    /// Loader over the configured data directory.
    #[must_use]
    pub fn loader(&self) -> FixtureLoader {
        FixtureLoader::new(self.config.data_dir.clone(), self.env.clone())
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.loader())
    }

    /// Print `data` as a robot envelope (JSON) or via `human` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates rendering failures.
    pub fn emit<T, F>(&self, command: &str, data: &T, human: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> Result<String>,
    {
        let output = match self.format {
            OutputFormat::Json => {
                render_json(&RobotOutput::new(command, data), self.config.pretty)?
            }
            OutputFormat::Human => human(data)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Dispatch a parsed command.
///
/// # Errors
///
/// Any error from the command; validation failures are reported through the
/// returned exit code instead.
pub async fn run(command: Commands, ctx: &CommandContext) -> Result<ExitCode> {
    match command {
        Commands::Env(cmd) => env::execute(&cmd, ctx).await,
        Commands::Fixture(cmd) => fixture::execute(&cmd, ctx).await,
        Commands::Credentials(args) => credentials::execute(&args, ctx),
        Commands::Generate(cmd) => generate::execute(&cmd, ctx).await,
        Commands::Validate(args) => validate::execute(&args, ctx).await,
    }
}
