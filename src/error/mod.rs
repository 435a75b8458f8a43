//! Error types for erpdata.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are grouped into five categories:
//! - **Fixture**: Missing, unparseable, or incomplete fixture documents
//! - **Credentials**: Role credentials absent from the environment
//! - **Synthesis**: Record generation asked for values outside a fixture list
//! - **Configuration**: Config file parsing or invalid values
//! - **Internal**: I/O, serialization, and unclassified errors
//!
//! Each error has a stable error code (e.g., `ERPD-F001`) for programmatic handling.
//!
//! Validation failures are not errors. They are returned as
//! [`ValidationResult`](crate::core::validation::ValidationResult) values so
//! negative-path tests can assert on them.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Fixture documents: missing files, parse failures, missing keys or sheets.
    Fixture,
    /// Credential pairs that are not configured in the environment.
    Credentials,
    /// Record synthesis targeting values outside an authoritative list.
    Synthesis,
    /// Configuration file or value problems.
    Configuration,
    /// Internal errors (I/O, serialization, unexpected state).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Fixture => "Fixture error",
            Self::Credentials => "Credentials error",
            Self::Synthesis => "Synthesis error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Fixture => "F",
            Self::Credentials => "A",
            Self::Synthesis => "S",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes for the `erpdata` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Fixture missing or unreadable
    FixtureError = 2,
    /// Environment or configuration incomplete
    ConfigError = 3,
    /// Validation reported errors (used by `validate` and `env check`)
    ValidationFailed = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for erpdata operations.
///
/// Each variant has:
/// - A stable error code (e.g., `ERPD-F001`)
/// - A category for classification
/// - Fix suggestions for the CLI
#[derive(Error, Debug)]
pub enum DataError {
    // ==========================================================================
    // Fixture errors (Category: Fixture)
    // ==========================================================================
    /// Fixture file does not exist under the data root.
    #[error("Test data file not found: {path}")]
    FixtureNotFound {
        path: String,
    },

    /// Fixture content did not parse after placeholder substitution.
    #[error("Failed to parse test data file {path}: {message}")]
    FixtureParse {
        path: String,
        message: String,
    },

    /// Requested worksheet does not exist in the workbook.
    #[error("Sheet '{sheet}' not found in workbook: {path}")]
    FixtureSheetNotFound {
        path: String,
        sheet: String,
    },

    /// Top-level key absent from a JSON fixture.
    #[error("Key '{key}' not found in test data file: {name}.json")]
    FixtureKeyNotFound {
        name: String,
        key: String,
    },

    /// A row helper was handed an empty data set.
    #[error("Invalid or empty data array provided")]
    EmptyData,

    /// Named validation case missing from the user management fixture.
    #[error("Validation test case '{case}' not found in test data")]
    ValidationCaseNotFound {
        case: String,
    },

    // ==========================================================================
    // Credential errors (Category: Credentials)
    // ==========================================================================
    /// Neither the role's nor the default credential variables are set.
    #[error(
        "Credentials not found for user type: {role}. Please ensure the following environment variables are set: {username_var}, {password_var}"
    )]
    CredentialsNotConfigured {
        role: String,
        username_var: String,
        password_var: String,
    },

    // ==========================================================================
    // Synthesis errors (Category: Synthesis)
    // ==========================================================================
    /// Department is not in the authoritative fixture list.
    #[error("Invalid department: {name}. Valid departments: {}", .valid.join(", "))]
    InvalidDepartment {
        name: String,
        valid: Vec<String>,
    },

    /// The fixture list of departments is empty or missing.
    #[error("No departments found in {fixture}.json")]
    NoDepartments {
        fixture: String,
    },

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse {
        path: String,
        message: String,
    },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DataError {
    /// Map error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::FixtureNotFound { .. }
            | Self::FixtureParse { .. }
            | Self::FixtureSheetNotFound { .. }
            | Self::FixtureKeyNotFound { .. }
            | Self::ValidationCaseNotFound { .. } => ExitCode::FixtureError,

            Self::CredentialsNotConfigured { .. }
            | Self::Config(_)
            | Self::ConfigParse { .. } => ExitCode::ConfigError,

            Self::InvalidDepartment { .. }
            | Self::NoDepartments { .. }
            | Self::EmptyData
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::FixtureNotFound { .. }
            | Self::FixtureParse { .. }
            | Self::FixtureSheetNotFound { .. }
            | Self::FixtureKeyNotFound { .. }
            | Self::EmptyData
            | Self::ValidationCaseNotFound { .. } => ErrorCategory::Fixture,

            Self::CredentialsNotConfigured { .. } => ErrorCategory::Credentials,

            Self::InvalidDepartment { .. } | Self::NoDepartments { .. } => {
                ErrorCategory::Synthesis
            }

            Self::Config(_) | Self::ConfigParse { .. } => ErrorCategory::Configuration,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `ERPD-{category}{number}` where category is:
    /// - F: Fixture
    /// - A: Credentials
    /// - S: Synthesis
    /// - C: Configuration
    /// - X: Internal
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FixtureNotFound { .. } => "ERPD-F001",
            Self::FixtureParse { .. } => "ERPD-F002",
            Self::FixtureSheetNotFound { .. } => "ERPD-F003",
            Self::FixtureKeyNotFound { .. } => "ERPD-F004",
            Self::EmptyData => "ERPD-F005",
            Self::ValidationCaseNotFound { .. } => "ERPD-F006",

            Self::CredentialsNotConfigured { .. } => "ERPD-A001",

            Self::InvalidDepartment { .. } => "ERPD-S001",
            Self::NoDepartments { .. } => "ERPD-S002",

            Self::Config(_) => "ERPD-C001",
            Self::ConfigParse { .. } => "ERPD-C002",

            Self::Io(_) => "ERPD-X001",
            Self::Json(_) => "ERPD-X002",
            Self::Other(_) => "ERPD-X099",
        }
    }

    /// Returns actionable fix suggestions for this error.
    ///
    /// # Example
    ///
    /// ```
    /// use erpdata::error::DataError;
    ///
    /// let err = DataError::CredentialsNotConfigured {
    ///     role: "manager".to_string(),
    ///     username_var: "TEST_USER_USERNAME".to_string(),
    ///     password_var: "TEST_USER_PASSWORD".to_string(),
    /// };
    /// let suggestions = err.fix_suggestions();
    /// assert!(suggestions[0].commands.iter().any(|c| c.contains("TEST_USER_USERNAME")));
    /// ```
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::FixtureNotFound { path } => suggestions::fixture_not_found_suggestions(path),
            Self::FixtureParse { path, message } => {
                suggestions::fixture_parse_suggestions(path, message)
            }
            Self::FixtureSheetNotFound { path, sheet } => {
                suggestions::sheet_not_found_suggestions(path, sheet)
            }
            Self::FixtureKeyNotFound { name, key } => {
                suggestions::key_not_found_suggestions(name, key)
            }
            Self::EmptyData => vec![FixSuggestion::new(
                vec!["erpdata fixture show <name>".to_string()],
                "The data set is empty. Check that the fixture has at least one row.",
            )],
            Self::ValidationCaseNotFound { case } => vec![FixSuggestion::new(
                vec!["erpdata fixture show user-management-data".to_string()],
                format!("Add a '{case}' entry to userValidationTests in user-management-data.json."),
            )],
            Self::CredentialsNotConfigured {
                role,
                username_var,
                password_var,
            } => suggestions::credentials_suggestions(role, username_var, password_var),
            Self::InvalidDepartment { name, valid } => {
                suggestions::invalid_department_suggestions(name, valid)
            }
            Self::NoDepartments { fixture } => vec![FixSuggestion::new(
                vec![format!("erpdata fixture show {fixture}")],
                format!("Add a non-empty \"departments\" array to {fixture}.json."),
            )],
            Self::Config(msg) => vec![FixSuggestion::new(
                vec!["erpdata env check".to_string()],
                format!("Configuration error: {msg}"),
            )],
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::Io(err) => vec![FixSuggestion::new(
                vec!["# Check file permissions and disk space".to_string()],
                format!("I/O error: {err}. Check file permissions and available disk space."),
            )],
            Self::Json(err) => vec![FixSuggestion::new(
                vec!["erpdata fixture list".to_string()],
                format!("JSON error: {err}. The data may be in an unexpected shape."),
            )],
            Self::Other(err) => vec![FixSuggestion::new(
                Vec::new(),
                format!("Unexpected error: {err}. Please report this issue."),
            )],
        }
    }
}

/// Result type alias for erpdata operations.
pub type Result<T> = std::result::Result<T, DataError>;

// =============================================================================
// Tests
// =============================================================================
