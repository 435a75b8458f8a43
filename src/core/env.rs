//! Environment sources and `${VAR}` placeholder resolution.
//!
//! Fixture text may reference environment variables as `${NAME}`. Resolution
//! is purely textual and happens before the content is parsed, so a
//! placeholder can sit anywhere in a JSON string or CSV cell.
//!
//! Components never read `std::env` directly. They hold an [`EnvSource`],
//! which is [`ProcessEnv`] in production and [`MapEnv`] in tests.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

/// Matches complete `${IDENTIFIER}` spans; IDENTIFIER is any run without `}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

/// A read-only view of environment variables.
pub trait EnvSource: Send + Sync {
    /// Look up a variable. `None` when it is not defined.
    fn var(&self, key: &str) -> Option<String>;

    /// Look up a variable, treating an empty value as undefined.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// Shared handle to an environment source.
pub type SharedEnv = Arc<dyn EnvSource>;

/// The real process environment, re-read on every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// A shared handle to the process environment.
    #[must_use]
    pub fn shared() -> SharedEnv {
        Arc::new(Self)
    }
}

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: define a variable.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Define or replace a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a variable.
    pub fn remove(&mut self, key: &str) {
        self.vars.remove(key);
    }

    /// Convert into a shared handle.
    #[must_use]
    pub fn shared(self) -> SharedEnv {
        Arc::new(self)
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Substitute every `${NAME}` in `content` with the variable's value.
///
/// Undefined variables become the empty string and log a warning. Substituted
/// values are inserted verbatim and never re-scanned. Unterminated `${` is left
/// as-is. This function does not fail.
///
/// A literal `${...}` cannot be escaped; it is always treated as a placeholder.
#[must_use]
pub fn resolve_placeholders(content: &str, env: &dyn EnvSource) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures<'_>| {
            let name = &caps[1];
            env.var(name).unwrap_or_else(|| {
                tracing::warn!(
                    variable = name,
                    "Environment variable {name} is not defined, using empty string"
                );
                String::new()
            })
        })
        .into_owned()
}

/// Substitute placeholders inside every string of a JSON tree.
///
/// Unlike [`resolve_placeholders`], an undefined variable keeps its original
/// `${NAME}` token so the caller can see which secret was missing.
#[must_use]
pub fn resolve_value_keeping_unresolved(value: &Value, env: &dyn EnvSource) -> Value {
    match value {
        Value::String(text) => Value::String(
            PLACEHOLDER
                .replace_all(text, |caps: &Captures<'_>| {
                    env.var(&caps[1]).unwrap_or_else(|| {
                        tracing::warn!(
                            variable = &caps[1],
                            "Environment variable {} not found, keeping placeholder",
                            &caps[1]
                        );
                        caps[0].to_string()
                    })
                })
                .into_owned(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value_keeping_unresolved(item, env))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value_keeping_unresolved(v, env)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Names of all variables referenced by `content`, in order, without duplicates.
#[must_use]
pub fn placeholder_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(content) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Placeholder resolver bound to one environment source.
#[derive(Clone)]
pub struct PlaceholderResolver {
    env: SharedEnv,
}

impl PlaceholderResolver {
    #[must_use]
    pub fn new(env: SharedEnv) -> Self {
        Self { env }
    }

    /// See [`resolve_placeholders`].
    #[must_use]
    pub fn resolve(&self, content: &str) -> String {
        resolve_placeholders(content, self.env.as_ref())
    }

    /// The underlying environment source.
    #[must_use]
    pub fn env(&self) -> &SharedEnv {
        &self.env
    }
}

impl std::fmt::Debug for PlaceholderResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn env() -> MapEnv {
        MapEnv::new()
            .with("TEST_USER_USERNAME", "alice")
            .with("TEST_USER_PASSWORD", "secret1")
            .with("NESTED", "${TEST_USER_USERNAME}")
    }

    #[test]
    fn substitutes_defined_variables() {
        let out = resolve_placeholders(r#"{"username": "${TEST_USER_USERNAME}"}"#, &env());
        assert_eq!(out, r#"{"username": "alice"}"#);
    }

    #[test]
    fn substitutes_multiple_in_one_line() {
        let out = resolve_placeholders("${TEST_USER_USERNAME}:${TEST_USER_PASSWORD}", &env());
        assert_eq!(out, "alice:secret1");
    }

    #[traced_test]
    #[test]
    fn undefined_variable_becomes_empty_and_warns() {
        let out = resolve_placeholders("user=${NOT_DEFINED_ANYWHERE};", &env());
        assert_eq!(out, "user=;");
        assert!(logs_contain("NOT_DEFINED_ANYWHERE"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = resolve_placeholders("${NESTED}", &env());
        assert_eq!(out, "${TEST_USER_USERNAME}");
    }

    #[test]
    fn malformed_patterns_are_left_untouched() {
        assert_eq!(resolve_placeholders("${UNTERMINATED", &env()), "${UNTERMINATED");
        assert_eq!(resolve_placeholders("${}", &env()), "${}");
        assert_eq!(resolve_placeholders("$TEST_USER_USERNAME", &env()), "$TEST_USER_USERNAME");
    }

    #[test]
    fn identifier_may_contain_any_char_but_brace() {
        let env = MapEnv::new().with("weird name-1", "ok");
        assert_eq!(resolve_placeholders("${weird name-1}", &env), "ok");
    }

    #[test]
    fn value_walk_keeps_unresolved_tokens() {
        let value = json!({
            "user": "${TEST_USER_USERNAME}",
            "list": ["${MISSING}", 3, true],
            "nested": {"pw": "x-${TEST_USER_PASSWORD}"}
        });
        let out = resolve_value_keeping_unresolved(&value, &env());
        assert_eq!(
            out,
            json!({
                "user": "alice",
                "list": ["${MISSING}", 3, true],
                "nested": {"pw": "x-secret1"}
            })
        );
    }

    #[test]
    fn lists_placeholder_names_once() {
        let names = placeholder_names("${A} ${B} ${A} ${");
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_values_are_not_non_empty() {
        let env = MapEnv::new().with("EMPTY", "");
        assert_eq!(env.var("EMPTY"), Some(String::new()));
        assert_eq!(env.non_empty("EMPTY"), None);
    }

    #[test]
    fn resolver_uses_shared_env() {
        let resolver = PlaceholderResolver::new(env().shared());
        assert_eq!(resolver.resolve("${TEST_USER_USERNAME}"), "alice");
    }
}
