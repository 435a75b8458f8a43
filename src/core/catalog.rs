//! Well-known fixtures and the authoritative lists they carry.
//!
//! `user-management-data.json` is the single source of truth for departments
//! and access permissions; `login-data.json` holds login scenarios. Every
//! accessor re-reads its fixture.

use serde_json::Value;

use crate::core::fixtures::FixtureLoader;
use crate::error::{DataError, Result};

/// Fixture holding departments, access permissions and validation cases.
pub const USER_MANAGEMENT_FIXTURE: &str = "user-management-data";
/// Fixture holding valid and invalid login scenarios.
pub const LOGIN_FIXTURE: &str = "login-data";
/// Access permission used when the fixture does not provide a list.
pub const DEFAULT_ACCESS_PERMISSION: &str = "Full Access";

/// Typed accessors over the well-known fixtures.
#[derive(Debug, Clone)]
pub struct Catalog {
    loader: FixtureLoader,
}

impl Catalog {
    #[must_use]
    pub const fn new(loader: FixtureLoader) -> Self {
        Self { loader }
    }

    #[must_use]
    pub const fn loader(&self) -> &FixtureLoader {
        &self.loader
    }

    /// All valid departments, in fixture order.
    ///
    /// A fixture without a `departments` array yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates fixture loading errors.
    pub async fn departments(&self) -> Result<Vec<String>> {
        let data = self.loader.load_json(USER_MANAGEMENT_FIXTURE).await?;
        Ok(string_list(&data, "departments"))
    }

    /// All valid access permissions.
    ///
    /// Falls back to `["Full Access"]` when the fixture is unreadable or has
    /// no `accessPermissions` array.
    pub async fn access_permissions(&self) -> Vec<String> {
        match self.loader.load_json(USER_MANAGEMENT_FIXTURE).await {
            Ok(data) if data.get("accessPermissions").is_some() => {
                string_list(&data, "accessPermissions")
            }
            Ok(_) => vec![DEFAULT_ACCESS_PERMISSION.to_string()],
            Err(e) => {
                tracing::warn!(error = %e, "Error loading access permissions, using default");
                vec![DEFAULT_ACCESS_PERMISSION.to_string()]
            }
        }
    }

    /// The entry of `userValidationTests` whose `testCase` equals `case`.
    ///
    /// # Errors
    ///
    /// [`DataError::ValidationCaseNotFound`] when no entry matches.
    pub async fn validation_case(&self, case: &str) -> Result<Value> {
        let data = self.loader.load_json(USER_MANAGEMENT_FIXTURE).await?;
        data.get("userValidationTests")
            .and_then(Value::as_array)
            .and_then(|cases| {
                cases
                    .iter()
                    .find(|c| c.get("testCase").and_then(Value::as_str) == Some(case))
            })
            .cloned()
            .ok_or_else(|| DataError::ValidationCaseNotFound {
                case: case.to_string(),
            })
    }

    /// Login scenario for a user type.
    ///
    /// `validUser` and `admin` return the first valid user, `invalidUser` the
    /// first invalid user. Any other value is matched against `role`, falling
    /// back to the first valid user.
    ///
    /// # Errors
    ///
    /// [`DataError::EmptyData`] if the relevant list is empty or missing.
    pub async fn login_user(&self, user_type: &str) -> Result<Value> {
        let data = self.loader.load_json(LOGIN_FIXTURE).await?;
        let valid = array(&data, "validUsers");
        let first_valid = || valid.first().cloned().ok_or(DataError::EmptyData);

        match user_type {
            "validUser" | "admin" => first_valid(),
            "invalidUser" => array(&data, "invalidUsers")
                .first()
                .cloned()
                .ok_or(DataError::EmptyData),
            role => valid
                .iter()
                .find(|u| u.get("role").and_then(Value::as_str) == Some(role))
                .cloned()
                .map_or_else(first_valid, Ok),
        }
    }

    /// User management data of a given kind, or the first entry of `users`.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureKeyNotFound`] when neither is present.
    pub async fn user_data(&self, kind: &str) -> Result<Value> {
        let data = self.loader.load_json(USER_MANAGEMENT_FIXTURE).await?;
        data.get(kind)
            .filter(|v| !v.is_null())
            .or_else(|| array(&data, "users").first())
            .cloned()
            .ok_or_else(|| DataError::FixtureKeyNotFound {
                name: USER_MANAGEMENT_FIXTURE.to_string(),
                key: kind.to_string(),
            })
    }
}

fn array<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_list(data: &Value, key: &str) -> Vec<String> {
    array(data, key)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
