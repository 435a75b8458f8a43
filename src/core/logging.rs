//! Diagnostic logging to stderr or a file.
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber. Settings come from CLI flags, then `ERPDATA_LOG*` variables;
//! `RUST_LOG` replaces the computed filter entirely when set.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::core::env::EnvSource;

pub const LOG_LEVEL_ENV: &str = "ERPDATA_LOG";
pub const LOG_FORMAT_ENV: &str = "ERPDATA_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "ERPDATA_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    Json,
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "pretty" => Some(Self::Human),
            "json" | "jsonl" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Minimum severity to record.
///
/// Defaults to `Warn` so unresolved placeholders are visible without flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "critical" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Combine CLI values with the environment. Flags win; `verbose` raises
    /// the default level to `Debug`.
    #[must_use]
    pub fn resolve(
        flag_level: Option<&str>,
        json_output: bool,
        verbose: bool,
        env: &dyn EnvSource,
    ) -> Self {
        let level = flag_level
            .and_then(LogLevel::from_arg)
            .or_else(|| env.non_empty(LOG_LEVEL_ENV).and_then(|v| LogLevel::from_arg(&v)))
            .unwrap_or(if verbose { LogLevel::Debug } else { LogLevel::Warn });

        let format = if json_output {
            LogFormat::Json
        } else {
            env.non_empty(LOG_FORMAT_ENV)
                .and_then(|v| LogFormat::from_arg(&v))
                .unwrap_or_default()
        };

        let file = env
            .non_empty(LOG_FILE_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            level,
            format,
            file,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("erpdata={}", self.level.as_filter())
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(settings: &LogSettings) {
    let file = settings.file.as_ref().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    let writer = file.map_or_else(
        || BoxMakeWriter::new(std::io::stderr),
        BoxMakeWriter::new,
    );

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    match settings.format {
        LogFormat::Json => {
            builder.json().try_init().ok();
        }
        LogFormat::Compact => {
            builder.compact().with_target(true).try_init().ok();
        }
        LogFormat::Human => {
            builder.with_target(false).without_time().try_init().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnv;

    #[test]
    fn flags_win_over_environment() {
        let env = MapEnv::new()
            .with(LOG_LEVEL_ENV, "trace")
            .with(LOG_FORMAT_ENV, "compact");
        let settings = LogSettings::resolve(Some("info"), true, false, &env);
        assert_eq!(settings.level, LogLevel::Info);
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn environment_fills_gaps() {
        let env = MapEnv::new()
            .with(LOG_LEVEL_ENV, " debug ")
            .with(LOG_FORMAT_ENV, "compact")
            .with(LOG_FILE_ENV, "/tmp/erpdata.log");
        let settings = LogSettings::resolve(None, false, false, &env);
        assert_eq!(settings.level, LogLevel::Debug);
        assert_eq!(settings.format, LogFormat::Compact);
        assert_eq!(settings.file, Some(PathBuf::from("/tmp/erpdata.log")));
    }

    #[test]
    fn defaults_to_warn_and_verbose_raises() {
        let env = MapEnv::new();
        assert_eq!(LogSettings::resolve(None, false, false, &env).level, LogLevel::Warn);
        assert_eq!(LogSettings::resolve(None, false, true, &env).level, LogLevel::Debug);
        assert_eq!(
            LogSettings::resolve(None, false, false, &env).directive(),
            "erpdata=warn"
        );
    }

    #[test]
    fn unknown_values_are_ignored() {
        assert_eq!(LogLevel::from_arg("loud"), None);
        assert_eq!(LogFormat::from_arg("xml"), None);
        assert_eq!(LogLevel::from_arg("WARNING"), Some(LogLevel::Warn));
    }
}
