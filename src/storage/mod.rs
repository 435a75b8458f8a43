//! Configuration storage.

pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, DeploymentEnvironment, EnvironmentReport,
    ResolvedConfig, ENV_API_BASE_URL, ENV_BASE_URL, ENV_CONFIG, ENV_DATA_DIR, ENV_DEFAULT_TIMEOUT,
    ENV_EMAIL_DOMAIN, ENV_NODE_ENV, ENV_NO_COLOR, ENV_PRETTY, REQUIRED_VARS,
};
pub use paths::AppPaths;
