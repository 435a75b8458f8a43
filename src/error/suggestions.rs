//! Fix suggestions attached to [`DataError`](super::DataError) variants.
//!
//! Each suggestion names shell commands to run, why the error happened and,
//! where useful, how to keep it from coming back.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// One way out of an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Commands to try, best first. Copy-paste ready.
    pub commands: Vec<String>,

    /// What went wrong, in terms of fixtures and variables.
    pub context: String,

    pub prevention: Option<String>,

    /// Setting a variable or editing `.env` is enough.
    pub auto_fixable: bool,
}

impl FixSuggestion {
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
            auto_fixable: false,
        }
    }

    /// Attach a prevention tip.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }

    /// Mark as fixable by setting configuration alone.
    #[must_use]
    pub const fn auto_fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}

// =============================================================================
// Fixture Suggestions
// =============================================================================

/// Generates fix suggestions for a missing fixture file.
#[must_use]
pub fn fixture_not_found_suggestions(path: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![
                "erpdata fixture list".to_string(),
                "erpdata --data-dir <dir> fixture list".to_string(),
            ],
            format!(
                "No fixture exists at {path}. Fixtures are looked up by logical name \
                 (without extension) inside the data directory."
            ),
        )
        .with_prevention("Set TEST_DATA_DIR or [data] dir in erpdata.toml when running outside the project root."),
    ]
}

/// Generates fix suggestions for fixture parse failures.
#[must_use]
pub fn fixture_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("$EDITOR {path}"), "erpdata env check".to_string()],
            format!(
                "The fixture did not parse after ${{VAR}} substitution: {message}. \
                 An unset variable resolves to an empty string, which can break \
                 unquoted JSON values."
            ),
        )
        .with_prevention("Keep placeholders inside quoted JSON strings."),
    ]
}

/// Generates fix suggestions for a missing worksheet.
#[must_use]
pub fn sheet_not_found_suggestions(path: &str, sheet: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["erpdata fixture show <name> --kind xlsx".to_string()],
        format!("The workbook {path} has no sheet named '{sheet}'. Omit --sheet to read the first sheet."),
    )]
}

/// Generates fix suggestions for a missing top-level key.
#[must_use]
pub fn key_not_found_suggestions(name: &str, key: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("erpdata fixture show {name}")],
        format!("{name}.json has no top-level key '{key}'."),
    )]
}

// =============================================================================
// Credential Suggestions
// =============================================================================

/// Generates fix suggestions when credentials are not configured.
#[must_use]
pub fn credentials_suggestions(
    role: &str,
    username_var: &str,
    password_var: &str,
) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![
                format!("export {username_var}=<username>"),
                format!("export {password_var}=<password>"),
                "erpdata env check".to_string(),
            ],
            format!(
                "No credentials are configured for role '{role}', and the default \
                 pair {username_var}/{password_var} is incomplete."
            ),
        )
        .with_prevention("Keep credentials in a local .env file; it is loaded at start-up.")
        .auto_fixable(),
    ]
}

// =============================================================================
// Synthesis Suggestions
// =============================================================================

/// Generates fix suggestions for a department outside the fixture list.
#[must_use]
pub fn invalid_department_suggestions(name: &str, valid: &[String]) -> Vec<FixSuggestion> {
    let mut commands = vec!["erpdata fixture show user-management-data".to_string()];
    if let Some(first) = valid.first() {
        commands.push(format!("erpdata generate user --department \"{first}\""));
    }
    vec![FixSuggestion::new(
        commands,
        format!(
            "'{name}' is not listed in user-management-data.json. Departments must \
             come from the fixture so generated users match the application."
        ),
    )]
}

// =============================================================================
// Configuration Suggestions
// =============================================================================

/// Generates fix suggestions for config parse errors.
#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("$EDITOR {path}"), "erpdata env check".to_string()],
            format!("The config file has a syntax error. The TOML parser reported: {message}"),
        )
        .with_prevention("Consider using a TOML-aware editor with syntax highlighting."),
    ]
}

// =============================================================================
// Tests
// =============================================================================
