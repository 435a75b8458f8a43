//! Output rendering for the CLI.
//!
//! `human` writes colored terminal text, `robot` wraps command results in a
//! stable JSON envelope, `error` renders [`crate::error::DataError`] either way.

pub mod error;
pub mod human;
pub mod robot;

pub use robot::{RobotOutput, render_json};
