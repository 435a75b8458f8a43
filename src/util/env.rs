//! Terminal detection.

use std::io::IsTerminal;

use crate::core::env::EnvSource;

/// Check if stdout is a TTY.
#[must_use]
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Whether the environment allows color, ignoring the TTY check.
#[must_use]
pub fn color_allowed(no_color: bool, env: &dyn EnvSource) -> bool {
    !no_color && env.var("TERM").is_none_or(|term| term != "dumb")
}

/// Color only when allowed and stdout is a terminal.
#[must_use]
pub fn should_use_color(no_color: bool, env: &dyn EnvSource) -> bool {
    color_allowed(no_color, env) && stdout_is_tty()
}
