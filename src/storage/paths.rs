//! Platform paths for the config file.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Name of the config file, both in the working directory and the platform
/// config directory.
pub const CONFIG_FILE_NAME: &str = "erpdata.toml";

/// Application paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Platform configuration directory.
    pub config: PathBuf,
}

impl AppPaths {
    #[must_use]
    pub fn new() -> Self {
        ProjectDirs::from("com", "erpdata", "erpdata").map_or_else(
            || {
                let home = directories::BaseDirs::new()
                    .map_or_else(|| PathBuf::from("."), |d| d.home_dir().to_path_buf());
                Self {
                    config: home.join(".config/erpdata"),
                }
            },
            |dirs| Self {
                config: dirs.config_dir().to_path_buf(),
            },
        )
    }

    /// `<config dir>/erpdata.toml`.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE_NAME)
    }

    /// The config file in the working directory, if present, else the
    /// platform one.
    #[must_use]
    pub fn discover_config_file(&self) -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            local
        } else {
            self.config_file()
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
