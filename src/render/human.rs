//! Human-readable terminal output using `colored`.

use colored::Colorize;
use serde::Serialize;

use crate::core::credentials::{CredentialSource, Credentials, Role};
use crate::core::validation::ValidationResult;
use crate::error::Result;
use crate::storage::config::{EnvironmentReport, ResolvedConfig};

/// Enable or disable ANSI colors for everything rendered afterwards.
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Environment check: missing variables, then the resolved configuration.
#[must_use]
pub fn render_env_report(
    report: &EnvironmentReport,
    config: &ResolvedConfig,
    unresolved: &[(String, Vec<String>)],
) -> String {
    let mut out = vec!["Environment check".bold().to_string()];
    out.push(format!(
        "  Required variables: {}   Missing: {}",
        report.required.len(),
        report.missing_vars.len()
    ));

    if report.is_valid {
        out.push(format!("  {}", "PASSED: all required variables are set".green()));
    } else {
        out.push(format!("  {}", "FAILED: missing environment variables".red().bold()));
        for var in &report.missing_vars {
            out.push(format!("    {var}=your_value_here"));
        }
        out.push("  Copy .env.template to .env and fill in your values.".dimmed().to_string());
    }

    out.push(String::new());
    out.push("Configuration".bold().to_string());
    let rows = [
        ("Environment", config.environment.to_string(), config.sources.environment),
        ("Base URL", config.base_url.clone(), config.sources.base_url),
        ("API URL", config.api_url.clone(), config.sources.api_url),
        ("Email domain", config.email_domain.clone(), config.sources.email_domain),
        ("Data dir", config.data_dir.display().to_string(), config.sources.data_dir),
        (
            "Timeout",
            format!("{}ms", config.timeout.as_millis()),
            config.sources.timeout,
        ),
    ];
    for (label, value, source) in rows {
        out.push(format!(
            "  {:<14}{value} {}",
            format!("{label}:"),
            format!("({source})").dimmed()
        ));
    }

    for (fixture, names) in unresolved {
        out.push(String::new());
        if names.is_empty() {
            out.push(format!("{} {fixture}: all placeholders resolve", "ok".green()));
        } else {
            out.push(format!(
                "{} {fixture}: unset placeholders {}",
                "warn".yellow().bold(),
                names.join(", ")
            ));
        }
    }

    out.join("\n")
}

/// Selected credentials with the password masked.
#[must_use]
pub fn render_credentials(
    requested: &str,
    credentials: &Credentials,
    source: CredentialSource,
) -> String {
    let origin = match source {
        CredentialSource::Role(role) => {
            let (user_var, pass_var) = role.env_vars();
            format!("{role} ({user_var}, {pass_var})")
        }
        CredentialSource::Fallback => {
            let (user_var, pass_var) = Role::Default.env_vars();
            format!("default fallback ({user_var}, {pass_var})")
        }
    };
    [
        format!("{} {}", "Role:".bold(), requested),
        format!("{} {}", "Source:".bold(), origin.dimmed()),
        format!("{} {}", "Username:".bold(), credentials.username),
        format!("{} {}", "Password:".bold(), credentials.masked_password()),
    ]
    .join("\n")
}

/// Validation results, one block per record.
#[must_use]
pub fn render_validation(results: &[ValidationResult]) -> String {
    let mut out = Vec::new();
    for (i, result) in results.iter().enumerate() {
        let label = format!("Record {}", i + 1);
        if result.is_valid {
            out.push(format!("{} {}", "valid".green().bold(), label));
        } else {
            out.push(format!("{} {}", "invalid".red().bold(), label));
            for error in &result.errors {
                out.push(format!("  - {error}"));
            }
        }
    }
    let invalid = results.iter().filter(|r| !r.is_valid).count();
    out.push(format!("{} of {} records valid", results.len() - invalid, results.len()));
    out.join("\n")
}

/// Names grouped by fixture kind.
#[must_use]
pub fn render_fixture_list(groups: &[(String, Vec<String>)]) -> String {
    let mut out = Vec::new();
    for (kind, names) in groups {
        out.push(format!("{} ({})", kind.bold(), names.len()));
        if names.is_empty() {
            out.push(format!("  {}", "none".dimmed()));
        }
        for name in names {
            out.push(format!("  {name}"));
        }
    }
    out.join("\n")
}

/// Records as indented JSON; there is no tabular form worth the width.
///
/// # Errors
///
/// Propagates serialization failures.
pub fn render_records<T: Serialize + ?Sized>(records: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
