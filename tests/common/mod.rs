//! Shared helpers for integration tests.
//!
//! # Modules
//!
//! - `log_capture`: captures tracing events emitted by library calls
//!
//! The CLI helpers here run the binary against a scratch data directory with
//! every variable the binary reads removed from its environment, so tests do
//! not depend on the developer's shell or `.env`.
#![allow(dead_code)]

pub mod log_capture;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use assert_cmd::Command;

/// Variables the binary reads. Cleared before each CLI run.
pub const ERPDATA_VARS: &[&str] = &[
    "TEST_USER_USERNAME",
    "TEST_USER_PASSWORD",
    "ADMIN_USERNAME",
    "ADMIN_PASSWORD",
    "MANAGER_USERNAME",
    "MANAGER_PASSWORD",
    "REGULAR_USER_USERNAME",
    "REGULAR_USER_PASSWORD",
    "BASE_URL",
    "API_BASE_URL",
    "DEFAULT_EMAIL_DOMAIN",
    "DEFAULT_TIMEOUT",
    "NODE_ENV",
    "TEST_DATA_DIR",
    "ERPDATA_CONFIG",
    "ERPDATA_PRETTY",
    "ERPDATA_NO_COLOR",
    "ERPDATA_LOG",
    "ERPDATA_LOG_FORMAT",
    "ERPDATA_LOG_FILE",
    "RUST_LOG",
];

/// `erpdata` with a clean environment, run from `cwd` so no `.env` or
/// `erpdata.toml` from the repository is picked up.
#[allow(deprecated)]
pub fn bare(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("erpdata").expect("binary built");
    for var in ERPDATA_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(cwd).env("NO_COLOR", "1");
    cmd
}

/// [`bare`] rooted at `data_dir` and reading `config`.
pub fn with_config(data_dir: &Path, config: &Path) -> Command {
    let mut cmd = bare(data_dir);
    cmd.arg("--data-dir").arg(data_dir).arg("--config").arg(config);
    cmd
}

/// [`bare`] rooted at `data_dir` with a config path that does not exist.
pub fn erpdata(data_dir: &Path) -> Command {
    with_config(data_dir, &data_dir.join("no-such-config.toml"))
}

/// [`erpdata`] with every required variable set.
pub fn erpdata_with_env(data_dir: &Path) -> Command {
    let mut cmd = erpdata(data_dir);
    cmd.env("TEST_USER_USERNAME", "alice")
        .env("TEST_USER_PASSWORD", "secret1")
        .env("BASE_URL", "http://localhost:3000")
        .env("DEFAULT_EMAIL_DOMAIN", "digitalmesh.com");
    cmd
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets process variables for the lifetime of the guard and restores them on
/// drop. Holds a global lock so tests touching the process environment run
/// one at a time.
pub struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    prior: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    #[allow(unsafe_code)]
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut prior = Vec::with_capacity(vars.len());

        for (key, value) in vars {
            prior.push(((*key).to_string(), std::env::var(key).ok()));
            // SAFETY: serialized by ENV_LOCK.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self { _lock: lock, prior }
    }
}

impl Drop for EnvGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        for (key, value) in self.prior.drain(..) {
            // SAFETY: still holding ENV_LOCK.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(&key, val),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}
