//! Robot-mode (JSON) output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

/// Schema identifier carried by every envelope.
pub const SCHEMA_VERSION: &str = "erpdata.v1";

/// Envelope for machine-readable command output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> RobotOutput<T> {
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            command: command.into(),
            data,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Serialize compactly, or with 2-space indentation when `pretty`.
///
/// # Errors
///
/// Propagates serialization failures.
pub fn render_json<T: Serialize + ?Sized>(output: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn envelope_shape() {
        let output = RobotOutput::new("generate user", json!([{"fullName": "A"}]));
        let value: Value = serde_json::from_str(&render_json(&output, false).unwrap()).unwrap();
        assert_eq!(value["schemaVersion"], "erpdata.v1");
        assert_eq!(value["command"], "generate user");
        assert_eq!(value["data"][0]["fullName"], "A");
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let rendered = render_json(&json!({"a": 1}), true).unwrap();
        assert_eq!(rendered, "{\n  \"a\": 1\n}");
    }
}
