//! Test utilities for erpdata.
//!
//! Provides a temporary data directory with the well-known fixtures, sample
//! fixture contents, a credential-complete environment, and assertion macros.
//!
//! # Usage
//!
//! ```rust,ignore
//! use erpdata::test_utils::*;
//!
//! let data = TestDataDir::with_standard_fixtures();
//! let catalog = data.catalog(test_env().shared());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::core::catalog::Catalog;
use crate::core::env::{MapEnv, SharedEnv};
use crate::core::fixtures::FixtureLoader;

/// Departments in [`sample_user_management`].
pub const SAMPLE_DEPARTMENTS: &[&str] = &[
    "Sales",
    "Operations",
    "Customer Service",
    "Finance",
    "IT Support",
];

/// Access permissions in [`sample_user_management`].
pub const SAMPLE_ACCESS_PERMISSIONS: &[&str] = &["Full Access", "Read Only", "Limited Access"];

// =============================================================================
// Sample Fixtures
// =============================================================================

/// `user-management-data.json` with departments, permissions, validation
/// cases and one templated user.
#[must_use]
pub fn sample_user_management() -> Value {
    json!({
        "departments": SAMPLE_DEPARTMENTS,
        "accessPermissions": SAMPLE_ACCESS_PERMISSIONS,
        "userValidationTests": [
            {
                "testCase": "invalidEmail",
                "data": {"email": "not-an-email"},
                "expectedError": "Email must use @digitalmesh.com domain: not-an-email"
            },
            {
                "testCase": "missingName",
                "data": {"fullName": ""},
                "expectedError": "Required field missing: fullName"
            }
        ],
        "users": [
            {"fullName": "Template User", "department": "Sales", "email": "template@digitalmesh.com"}
        ]
    })
}

/// `login-data.json` whose valid user references credential variables.
#[must_use]
pub fn sample_login_data() -> &'static str {
    r#"{
  "validUsers": [
    {"username": "${TEST_USER_USERNAME}", "password": "${TEST_USER_PASSWORD}", "role": "administrator"},
    {"username": "${MANAGER_USERNAME}", "password": "${MANAGER_PASSWORD}", "role": "manager"}
  ],
  "invalidUsers": [
    {"username": "nobody", "password": "wrong_password", "expectedError": "Invalid credentials"}
  ]
}"#
}

/// CSV of users with a placeholder in the first data row.
#[must_use]
pub fn sample_users_csv() -> &'static str {
    "username,department,status\n${TEST_USER_USERNAME},Sales,Active\nbob,Operations,Inactive\n"
}

/// An environment with the default credential pair and base settings.
#[must_use]
pub fn test_env() -> MapEnv {
    MapEnv::new()
        .with("TEST_USER_USERNAME", "alice")
        .with("TEST_USER_PASSWORD", "secret1")
        .with("BASE_URL", "http://localhost:3000")
        .with("DEFAULT_EMAIL_DOMAIN", "digitalmesh.com")
}

// =============================================================================
// Temporary Data Directory
// =============================================================================

/// A temporary fixture directory, removed on drop.
///
/// # Examples
///
/// ```rust,ignore
/// let data = TestDataDir::new();
/// data.create_file("products.csv", "productName\nAcetone\n");
/// assert!(data.file_exists("products.csv"));
/// ```
pub struct TestDataDir {
    inner: tempfile::TempDir,
}

impl TestDataDir {
    /// Create an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// A data directory holding the sample user-management, login and CSV
    /// fixtures.
    #[must_use]
    pub fn with_standard_fixtures() -> Self {
        let dir = Self::new();
        dir.write_json("user-management-data", &sample_user_management());
        dir.create_file("login-data.json", sample_login_data());
        dir.create_file("users.csv", sample_users_csv());
        dir
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file, creating parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    /// Write `<name>.json` with 2-space indentation.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot be serialized or written.
    pub fn write_json(&self, name: &str, value: &Value) {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
        self.create_file(&format!("{name}.json"), &content);
    }

    /// Replace the department list in `user-management-data.json`.
    pub fn set_departments(&self, departments: &[&str]) {
        let mut data = sample_user_management();
        data["departments"] = json!(departments);
        self.write_json("user-management-data", &data);
    }

    #[must_use]
    pub fn file_exists(&self, name: &str) -> bool {
        self.inner.path().join(name).exists()
    }

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }

    /// Loader rooted here.
    #[must_use]
    pub fn loader(&self, env: SharedEnv) -> FixtureLoader {
        FixtureLoader::new(self.inner.path(), env)
    }

    #[must_use]
    pub fn catalog(&self, env: SharedEnv) -> Catalog {
        Catalog::new(self.loader(env))
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = &$haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a string does NOT contain a substring.
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = &$haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a `ValidationResult` is valid, printing its errors otherwise.
#[macro_export]
macro_rules! assert_valid {
    ($result:expr) => {
        let result = &$result;
        assert!(
            result.is_valid && result.errors.is_empty(),
            "Expected a valid record, got errors: {:?}",
            result.errors
        );
    };
}

/// Assert that a `ValidationResult` is invalid and carries `message`.
#[macro_export]
macro_rules! assert_invalid_with {
    ($result:expr, $message:expr) => {
        let result = &$result;
        let message: &str = $message;
        assert!(!result.is_valid, "Expected an invalid record");
        assert!(
            result.errors.iter().any(|e| e == message),
            "Expected error {:?}, got {:?}",
            message,
            result.errors
        );
    };
}

/// Strip ANSI escape codes from a string.
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
