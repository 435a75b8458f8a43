//! Error rendering with fix suggestions.

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::{DataError, FixSuggestion};

/// Render an error for stderr.
///
/// JSON output is a structured object; human output is a header with the
/// error code followed by the suggestions.
#[must_use]
pub fn render_error(error: &DataError, format: OutputFormat, pretty: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        OutputFormat::Human => render_human(error),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &DataError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error))
}

fn render_human(error: &DataError) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines = vec![format!(
        "{} {}",
        error.to_string().red().bold(),
        format!("[{}]", error.error_code()).dimmed()
    )];

    if !suggestions.is_empty() {
        lines.push(String::new());
        lines.push("How to fix:".cyan().bold().to_string());
        lines.extend(suggestion_lines(&suggestions));
    }

    if let Some(first) = suggestions.first() {
        if !first.context.is_empty() {
            lines.push(String::new());
            lines.push("Why this happened:".bold().to_string());
            lines.push(format!("  {}", first.context));
        }
        if let Some(prevention) = &first.prevention {
            lines.push(String::new());
            lines.push("Prevention:".green().bold().to_string());
            lines.push(format!("  {prevention}"));
        }
    }

    lines.join("\n")
}

fn suggestion_lines(suggestions: &[FixSuggestion]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        for (j, cmd) in suggestion.commands.iter().enumerate() {
            let prefix = if j == 0 {
                format!("  {}. ", i + 1)
            } else {
                "     Or: ".to_string()
            };
            lines.push(format!("{prefix}{}", cmd.cyan()));
        }
    }
    lines
}

/// Plain fallback: header and first fix command.
fn render_simple(error: &DataError) -> String {
    let mut lines = vec![format!("Error [{}]: {error}", error.error_code())];
    if let Some(cmd) = error
        .fix_suggestions()
        .first()
        .and_then(|s| s.commands.first())
    {
        lines.push(format!("Fix: {cmd}"));
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct ErrorJson {
    error_code: &'static str,
    category: String,
    message: String,
    exit_code: i32,
    suggestions: Vec<SuggestionJson>,
}

#[derive(Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
    auto_fixable: bool,
}

impl ErrorJson {
    fn from_error(error: &DataError) -> Self {
        Self {
            error_code: error.error_code(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: i32::from(error.exit_code()),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                    auto_fixable: s.auto_fixable,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn credentials_error() -> DataError {
        DataError::CredentialsNotConfigured {
            role: "manager".to_string(),
            username_var: "TEST_USER_USERNAME".to_string(),
            password_var: "TEST_USER_PASSWORD".to_string(),
        }
    }

    #[test]
    fn json_error_carries_code_and_suggestions() {
        let value: Value =
            serde_json::from_str(&render_error_json(&credentials_error(), false)).unwrap();
        assert_eq!(value["error_code"], "ERPD-A001");
        assert_eq!(value["exit_code"], 3);
        assert!(value["message"].as_str().unwrap().contains("TEST_USER_PASSWORD"));
        assert!(!value["suggestions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn simple_render_includes_fix_command() {
        let output = render_simple(&credentials_error());
        assert!(output.starts_with("Error [ERPD-A001]"));
        assert!(output.contains("Fix: export TEST_USER_USERNAME=<username>"));
    }

    #[test]
    fn human_render_lists_every_command() {
        let output = render_error(&credentials_error(), OutputFormat::Human, false);
        assert!(output.contains("ERPD-A001"));
        assert!(output.contains("export TEST_USER_PASSWORD=<password>"));
        assert!(output.contains("erpdata env check"));
    }
}
