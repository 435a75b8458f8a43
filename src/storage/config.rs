//! Configuration file loading and resolution.
//!
//! The config file is `erpdata.toml`, looked up in the working directory and
//! then in the platform config directory (`~/.config/erpdata/` on Linux).
//! `ERPDATA_CONFIG` or `--config` point at a specific file.
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `TEST_DATA_DIR`: fixture directory
//! - `NODE_ENV`: deployment environment (staging, production, development)
//! - `BASE_URL`, `API_BASE_URL`: application URLs
//! - `DEFAULT_EMAIL_DOMAIN`: domain for generated and validated emails
//! - `DEFAULT_TIMEOUT`: UI timeout in milliseconds
//! - `ERPDATA_PRETTY`, `ERPDATA_NO_COLOR` or `NO_COLOR`: output switches
//! - `ERPDATA_CONFIG`: config file path

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::Cli;
use crate::core::env::EnvSource;
use crate::core::validation::DEFAULT_REQUIRED_USER_FIELDS;
use crate::error::{DataError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_DATA_DIR: &str = "TEST_DATA_DIR";
pub const ENV_NODE_ENV: &str = "NODE_ENV";
pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_EMAIL_DOMAIN: &str = "DEFAULT_EMAIL_DOMAIN";
/// Milliseconds.
pub const ENV_DEFAULT_TIMEOUT: &str = "DEFAULT_TIMEOUT";
pub const ENV_PRETTY: &str = "ERPDATA_PRETTY";
pub const ENV_NO_COLOR: &str = "ERPDATA_NO_COLOR";
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
pub const ENV_CONFIG: &str = "ERPDATA_CONFIG";

/// Variables a test run cannot do without.
pub const REQUIRED_VARS: &[&str] = &[
    "TEST_USER_USERNAME",
    "TEST_USER_PASSWORD",
    ENV_BASE_URL,
    ENV_EMAIL_DOMAIN,
];

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_EMAIL_DOMAIN: &str = "digitalmesh.com";

// =============================================================================
// Deployment Environment
// =============================================================================

/// The ERP deployment the suite targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentEnvironment {
    #[default]
    Staging,
    Production,
    Development,
}

impl DeploymentEnvironment {
    pub const ALL: &'static [Self] = &[Self::Staging, Self::Production, Self::Development];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|env| env.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Staging => "https://training.bt-ms.com/MAIN-STAGE/erp.php",
            Self::Production => "https://production.bt-ms.com/erp.php",
            Self::Development => "http://localhost:3000",
        }
    }

    #[must_use]
    pub const fn default_api_url(self) -> &'static str {
        match self {
            Self::Staging => "https://training.bt-ms.com/api/v1",
            Self::Production => "https://production.bt-ms.com/api/v1",
            Self::Development => "http://localhost:3001/api/v1",
        }
    }

    #[must_use]
    pub const fn default_timeout(self) -> Duration {
        match self {
            Self::Staging => Duration::from_secs(30),
            Self::Production => Duration::from_secs(60),
            Self::Development => Duration::from_secs(15),
        }
    }
}

impl fmt::Display for DeploymentEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Fixture root directory.
    pub data_dir: PathBuf,
    pub environment: DeploymentEnvironment,
    pub base_url: String,
    pub api_url: String,
    /// Domain every user email must use.
    pub email_domain: String,
    /// Default UI timeout for the targeted deployment.
    pub timeout: Duration,
    /// Fields `validate user` requires.
    pub required_user_fields: Vec<String>,
    pub pretty: bool,
    pub no_color: bool,
    /// Config file that was read, if any.
    pub config_file: Option<PathBuf>,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    pub data_dir: ConfigSource,
    pub environment: ConfigSource,
    pub base_url: ConfigSource,
    pub api_url: ConfigSource,
    pub email_domain: ConfigSource,
    pub timeout: ConfigSource,
    pub required_user_fields: ConfigSource,
    pub pretty: ConfigSource,
    pub no_color: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// First present value wins, recording where it came from.
fn first_of<T>(
    candidates: [(Option<T>, ConfigSource); 3],
    default: T,
    source: &mut ConfigSource,
) -> T {
    for (value, from) in candidates {
        if let Some(value) = value {
            *source = from;
            return value;
        }
    }
    *source = ConfigSource::Default;
    default
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI args, environment variables, and
    /// the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// resolved value is invalid.
    pub fn resolve(cli: &Cli, env: &dyn EnvSource) -> Result<Self> {
        let (config, config_file) = Self::load_config(cli, env)?;
        config.validate()?;

        let mut sources = ConfigSources::default();

        let data_dir = first_of(
            [
                (cli.data_dir.clone(), ConfigSource::Cli),
                (env.non_empty(ENV_DATA_DIR).map(PathBuf::from), ConfigSource::Env),
                (config.data.dir.clone(), ConfigSource::ConfigFile),
            ],
            PathBuf::from(DEFAULT_DATA_DIR),
            &mut sources.data_dir,
        );

        let environment = Self::resolve_environment(&config, env, &mut sources.environment);

        let base_url = first_of(
            [
                (None, ConfigSource::Cli),
                (env.non_empty(ENV_BASE_URL), ConfigSource::Env),
                (config.environment.base_url.clone(), ConfigSource::ConfigFile),
            ],
            environment.default_base_url().to_string(),
            &mut sources.base_url,
        );

        let api_url = first_of(
            [
                (None, ConfigSource::Cli),
                (env.non_empty(ENV_API_BASE_URL), ConfigSource::Env),
                (config.environment.api_url.clone(), ConfigSource::ConfigFile),
            ],
            environment.default_api_url().to_string(),
            &mut sources.api_url,
        );

        let email_domain = first_of(
            [
                (None, ConfigSource::Cli),
                (env.non_empty(ENV_EMAIL_DOMAIN), ConfigSource::Env),
                (config.environment.email_domain.clone(), ConfigSource::ConfigFile),
            ],
            DEFAULT_EMAIL_DOMAIN.to_string(),
            &mut sources.email_domain,
        );

        let timeout = Self::resolve_timeout(environment, env, &mut sources.timeout)?;

        let required_user_fields = first_of(
            [
                (None, ConfigSource::Cli),
                (None, ConfigSource::Env),
                (config.validation.required_user_fields.clone(), ConfigSource::ConfigFile),
            ],
            DEFAULT_REQUIRED_USER_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            &mut sources.required_user_fields,
        );

        let pretty = first_of(
            [
                (cli.pretty.then_some(true), ConfigSource::Cli),
                (is_truthy(env, ENV_PRETTY).then_some(true), ConfigSource::Env),
                (config.output.pretty, ConfigSource::ConfigFile),
            ],
            false,
            &mut sources.pretty,
        );

        let env_no_color = is_truthy(env, ENV_NO_COLOR) || env.var(ENV_NO_COLOR_STD).is_some();
        let no_color = first_of(
            [
                (cli.no_color.then_some(true), ConfigSource::Cli),
                (env_no_color.then_some(true), ConfigSource::Env),
                (config.output.color.map(|color| !color), ConfigSource::ConfigFile),
            ],
            false,
            &mut sources.no_color,
        );

        Ok(Self {
            data_dir,
            environment,
            base_url,
            api_url,
            email_domain,
            timeout,
            required_user_fields,
            pretty,
            no_color,
            config_file,
            sources,
        })
    }

    /// Load the config file: `--config`, then `ERPDATA_CONFIG`, then discovery.
    fn load_config(cli: &Cli, env: &dyn EnvSource) -> Result<(Config, Option<PathBuf>)> {
        let path = cli
            .config
            .clone()
            .or_else(|| env.non_empty(ENV_CONFIG).map(PathBuf::from))
            .unwrap_or_else(|| AppPaths::new().discover_config_file());

        let config = Config::load_from(&path)?;
        let found = path.is_file().then_some(path);
        Ok((config, found))
    }

    fn resolve_environment(
        config: &Config,
        env: &dyn EnvSource,
        source: &mut ConfigSource,
    ) -> DeploymentEnvironment {
        if let Some(name) = env.non_empty(ENV_NODE_ENV) {
            *source = ConfigSource::Env;
            return DeploymentEnvironment::from_name(&name).unwrap_or_else(|| {
                tracing::warn!(environment = %name, "Unknown NODE_ENV, using staging defaults");
                DeploymentEnvironment::Staging
            });
        }

        if let Some(environment) = config.environment.name {
            *source = ConfigSource::ConfigFile;
            return environment;
        }

        *source = ConfigSource::Default;
        DeploymentEnvironment::default()
    }

    fn resolve_timeout(
        environment: DeploymentEnvironment,
        env: &dyn EnvSource,
        source: &mut ConfigSource,
    ) -> Result<Duration> {
        if let Some(raw) = env.non_empty(ENV_DEFAULT_TIMEOUT) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                DataError::Config(format!(
                    "Invalid {ENV_DEFAULT_TIMEOUT} value \"{raw}\": expected milliseconds"
                ))
            })?;
            *source = ConfigSource::Env;
            return Ok(Duration::from_millis(millis));
        }

        *source = ConfigSource::Default;
        Ok(environment.default_timeout())
    }
}

/// Whether a variable is set to a truthy value.
fn is_truthy(env: &dyn EnvSource, var: &str) -> bool {
    env.var(var)
        .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

// =============================================================================
// Environment Report
// =============================================================================

/// Presence check of the variables in [`REQUIRED_VARS`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReport {
    pub is_valid: bool,
    pub required: Vec<String>,
    pub missing_vars: Vec<String>,
}

impl EnvironmentReport {
    /// Variables that are unset or empty count as missing.
    #[must_use]
    pub fn check(env: &dyn EnvSource) -> Self {
        let missing_vars: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| env.non_empty(name).is_none())
            .map(ToString::to_string)
            .collect();

        Self {
            is_valid: missing_vars.is_empty(),
            required: REQUIRED_VARS.iter().map(ToString::to_string).collect(),
            missing_vars,
        }
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Contents of `erpdata.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub environment: EnvironmentConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Fixture directory, relative to the working directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub name: Option<DeploymentEnvironment>,
    pub base_url: Option<String>,
    pub api_url: Option<String>,
    pub email_domain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub required_user_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: Option<bool>,
    pub pretty: Option<bool>,
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// [`DataError::ConfigParse`] if the file exists but is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DataError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// [`DataError::Config`] for an empty email domain, a domain written with
    /// a leading `@`, or an empty required-field list.
    pub fn validate(&self) -> Result<()> {
        if let Some(domain) = &self.environment.email_domain {
            if domain.trim().is_empty() {
                return Err(DataError::Config("email_domain must not be empty".to_string()));
            }
            if domain.starts_with('@') {
                return Err(DataError::Config(format!(
                    "email_domain \"{domain}\" must not start with '@'"
                )));
            }
        }

        if self
            .validation
            .required_user_fields
            .as_ref()
            .is_some_and(Vec::is_empty)
        {
            return Err(DataError::Config(
                "required_user_fields must list at least one field".to_string(),
            ));
        }

        Ok(())
    }
}
