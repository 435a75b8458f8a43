//! User record synthesis.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Serializer};

use super::{random_id, timestamp_millis};
use crate::core::catalog::{Catalog, DEFAULT_ACCESS_PERMISSION, USER_MANAGEMENT_FIXTURE};
use crate::core::credentials::{CredentialSelector, mask_password};
use crate::core::fixtures::random_item;
use crate::core::models::{UserOverrides, UserRecord};
use crate::error::{DataError, Result};

/// Symbols a generated password may contain. One is always included.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";
/// Length of generated passwords.
pub const PASSWORD_LENGTH: usize = 12;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Generate a password with at least one uppercase letter, lowercase letter,
/// digit and symbol, padded with random alphanumerics and shuffled.
#[must_use]
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    let symbols = PASSWORD_SYMBOLS.as_bytes();

    let mut chars: Vec<char> = [UPPER, LOWER, DIGITS, symbols]
        .iter()
        .map(|set| pick_char(&mut rng, set))
        .collect();

    let alphanumeric = [UPPER, LOWER, DIGITS].concat();
    while chars.len() < PASSWORD_LENGTH {
        chars.push(pick_char(&mut rng, &alphanumeric));
    }

    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

fn pick_char(rng: &mut impl Rng, set: &[u8]) -> char {
    char::from(set[rng.random_range(0..set.len())])
}

/// Kinds of deliberately broken users for negative-path tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidUserKind {
    /// Name, username, email and both passwords blank.
    MissingRequired,
    /// Email without an `@domain`.
    InvalidEmail,
    /// `confirm_password` differs from `password`.
    PasswordMismatch,
}

/// Generates users whose constrained fields come from the fixture catalog.
#[derive(Debug, Clone)]
pub struct UserFactory {
    catalog: Catalog,
    email_domain: String,
}

impl UserFactory {
    #[must_use]
    pub fn new(catalog: Catalog, email_domain: impl Into<String>) -> Self {
        Self {
            catalog,
            email_domain: email_domain.into(),
        }
    }

    #[must_use]
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generate a user, applying `overrides` last.
    ///
    /// Without a department override the department is picked at random from
    /// the catalog, which is re-read on every call.
    ///
    /// # Errors
    ///
    /// Fixture errors, or [`DataError::NoDepartments`] when the catalog lists
    /// no departments.
    pub async fn generate_user(&self, overrides: UserOverrides) -> Result<UserRecord> {
        let department = match &overrides.department {
            Some(department) => department.clone(),
            None => self.random_department().await?,
        };

        let mut record = self.template(department);
        overrides.apply(&mut record);
        Ok(record)
    }

    fn template(&self, department: String) -> UserRecord {
        let id = random_id();
        let timestamp = timestamp_millis();
        let telephone: u64 = rand::rng().random_range(1_000_000_000..=9_999_999_999);
        let email = format!("user{id}@{}", self.email_domain);
        let password = generate_password();

        UserRecord {
            full_name: format!("Test User {id}"),
            company: format!("Test Company {id}"),
            telephone: format!("+44 {telephone}"),
            department,
            access_permission: DEFAULT_ACCESS_PERMISSION.to_string(),
            username: format!("user{id}_{timestamp}"),
            sending_instructions_email: email.clone(),
            email,
            confirm_password: password.clone(),
            password,
            status: "Active".to_string(),
            allow_system_generated_hbls: "No".to_string(),
            description: format!("Auto-generated test user {id}"),
        }
    }

    /// Generate `count` users with independently chosen departments.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_user`].
    pub async fn generate_users(&self, count: usize) -> Result<Vec<UserRecord>> {
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            users.push(self.generate_user(UserOverrides::default()).await?);
        }
        Ok(users)
    }

    /// Generate a user in `department`, which must be listed in the catalog.
    ///
    /// # Errors
    ///
    /// [`DataError::InvalidDepartment`] for a department not in the catalog.
    pub async fn generate_user_for_department(&self, department: &str) -> Result<UserRecord> {
        let valid = self.valid_departments().await?;
        if !valid.iter().any(|d| d == department) {
            return Err(DataError::InvalidDepartment {
                name: department.to_string(),
                valid,
            });
        }
        self.generate_user(UserOverrides::department(department))
            .await
    }

    /// Generate a user that fails validation in a specific way.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_user`].
    pub async fn generate_invalid_user(&self, kind: InvalidUserKind) -> Result<UserRecord> {
        let mut user = self.generate_user(UserOverrides::default()).await?;
        match kind {
            InvalidUserKind::MissingRequired => {
                user.full_name.clear();
                user.username.clear();
                user.email.clear();
                user.password.clear();
                user.confirm_password.clear();
            }
            InvalidUserKind::InvalidEmail => {
                user.email = "invalid-email-format".to_string();
            }
            InvalidUserKind::PasswordMismatch => {
                user.confirm_password = "DifferentPassword123!".to_string();
            }
        }
        Ok(user)
    }

    /// A department chosen uniformly from the catalog.
    ///
    /// # Errors
    ///
    /// [`DataError::NoDepartments`] for an empty list, or fixture errors.
    pub async fn random_department(&self) -> Result<String> {
        let departments = self.valid_departments().await?;
        random_item(&departments)
            .cloned()
            .map_err(|_| DataError::NoDepartments {
                fixture: USER_MANAGEMENT_FIXTURE.to_string(),
            })
    }

    /// The authoritative department list.
    ///
    /// # Errors
    ///
    /// Propagates fixture errors.
    pub async fn valid_departments(&self) -> Result<Vec<String>> {
        self.catalog.departments().await
    }

    /// Whether `department` is in the catalog.
    ///
    /// # Errors
    ///
    /// Propagates fixture errors.
    pub async fn is_valid_department(&self, department: &str) -> Result<bool> {
        Ok(self
            .valid_departments()
            .await?
            .iter()
            .any(|d| d == department))
    }
}

// =============================================================================
// Login data
// =============================================================================

/// Which login scenario to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    Valid,
    Invalid,
}

/// Credentials plus scenario metadata for login tests.
///
/// Serializes the password masked unless the login is expected to fail, in
/// which case it is a known dummy and is emitted as is.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginData {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
    pub expected_error: Option<String>,
    pub description: String,
}

impl Serialize for LoginData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            username: &'a str,
            password: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            expected_error: Option<&'a str>,
            description: &'a str,
        }

        let password = if self.expected_error.is_some() {
            self.password.clone()
        } else {
            mask_password(&self.password)
        };
        Wire {
            username: &self.username,
            password,
            role: self.role.as_deref(),
            expected_error: self.expected_error.as_deref(),
            description: &self.description,
        }
        .serialize(serializer)
    }
}

impl std::fmt::Debug for LoginData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginData")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("expected_error", &self.expected_error)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Login data for a scenario.
///
/// Valid logins use the admin role's environment credentials (falling back
/// to the default pair). Invalid logins use a timestamped unknown username.
///
/// # Errors
///
/// [`DataError::CredentialsNotConfigured`] for `Valid` without credentials.
pub fn generate_login_data(kind: LoginKind, selector: &CredentialSelector) -> Result<LoginData> {
    match kind {
        LoginKind::Valid => {
            let creds = selector.credentials("admin")?;
            Ok(LoginData {
                username: creds.username,
                password: creds.password,
                role: Some("administrator".to_string()),
                expected_error: None,
                description: "Valid admin user".to_string(),
            })
        }
        LoginKind::Invalid => Ok(LoginData {
            username: format!("invalid_{}", timestamp_millis()),
            password: "wrong_password".to_string(),
            role: None,
            expected_error: Some("Invalid credentials".to_string()),
            description: "Invalid username and password".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnv;
    use crate::core::fixtures::FixtureLoader;
    use serde_json::json;
    use tempfile::TempDir;

    const DEPARTMENTS: [&str; 3] = ["Sales", "Operations", "Customer Service"];

    fn factory(dir: &TempDir) -> UserFactory {
        std::fs::write(
            dir.path().join("user-management-data.json"),
            json!({"departments": DEPARTMENTS}).to_string(),
        )
        .unwrap();
        let loader = FixtureLoader::new(dir.path(), MapEnv::new().shared());
        UserFactory::new(Catalog::new(loader), "digitalmesh.com")
    }

    fn assert_password_policy(password: &str) {
        assert!(password.len() >= 8, "too short: {password}");
        assert!(password.chars().any(|c| c.is_ascii_uppercase()), "{password}");
        assert!(password.chars().any(|c| c.is_ascii_lowercase()), "{password}");
        assert!(password.chars().any(|c| c.is_ascii_digit()), "{password}");
        assert!(password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)), "{password}");
    }

    #[test]
    fn passwords_satisfy_policy() {
        for _ in 0..200 {
            let password = generate_password();
            assert_eq!(password.len(), PASSWORD_LENGTH);
            assert_password_policy(&password);
        }
    }

    #[test]
    fn password_symbol_position_varies() {
        let positions: std::collections::HashSet<usize> = (0..200)
            .filter_map(|_| generate_password().find(|c| PASSWORD_SYMBOLS.contains(c)))
            .collect();
        assert!(positions.len() > 1, "symbol always at {positions:?}");
    }

    #[tokio::test]
    async fn generated_users_use_fixture_departments() {
        let dir = TempDir::new().unwrap();
        let factory = factory(&dir);
        for _ in 0..25 {
            let user = factory.generate_user(UserOverrides::default()).await.unwrap();
            assert!(DEPARTMENTS.contains(&user.department.as_str()), "{}", user.department);
            assert_password_policy(&user.password);
            assert_eq!(user.confirm_password, user.password);
            assert!(user.email.ends_with("@digitalmesh.com"));
            assert_eq!(user.email, user.sending_instructions_email);
            assert!(user.username.starts_with("user"));
        }
    }

    #[tokio::test]
    async fn overrides_win() {
        let dir = TempDir::new().unwrap();
        let overrides = UserOverrides {
            full_name: Some("Jane Roe".to_string()),
            status: Some("Inactive".to_string()),
            ..UserOverrides::default()
        };
        let user = factory(&dir).generate_user(overrides).await.unwrap();
        assert_eq!(user.full_name, "Jane Roe");
        assert_eq!(user.status, "Inactive");
    }

    #[tokio::test]
    async fn department_must_be_in_fixture() {
        let dir = TempDir::new().unwrap();
        let factory = factory(&dir);

        let user = factory.generate_user_for_department("Operations").await.unwrap();
        assert_eq!(user.department, "Operations");

        let err = factory
            .generate_user_for_department("NotARealDept")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid department: NotARealDept"), "{err}");
    }

    #[tokio::test]
    async fn empty_department_list_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("user-management-data.json"), r#"{"departments": []}"#)
            .unwrap();
        let loader = FixtureLoader::new(dir.path(), MapEnv::new().shared());
        let factory = UserFactory::new(Catalog::new(loader), "digitalmesh.com");
        let err = factory.generate_user(UserOverrides::default()).await.unwrap_err();
        assert!(matches!(err, DataError::NoDepartments { .. }));
    }

    #[tokio::test]
    async fn invalid_user_kinds() {
        let dir = TempDir::new().unwrap();
        let factory = factory(&dir);

        let user = factory.generate_invalid_user(InvalidUserKind::MissingRequired).await.unwrap();
        assert!(user.full_name.is_empty() && user.password.is_empty());

        let user = factory.generate_invalid_user(InvalidUserKind::InvalidEmail).await.unwrap();
        assert_eq!(user.email, "invalid-email-format");

        let user = factory.generate_invalid_user(InvalidUserKind::PasswordMismatch).await.unwrap();
        assert_ne!(user.password, user.confirm_password);
    }

    #[tokio::test]
    async fn generate_users_returns_count() {
        let dir = TempDir::new().unwrap();
        let users = factory(&dir).generate_users(4).await.unwrap();
        assert_eq!(users.len(), 4);
    }

    #[test]
    fn login_data_valid_uses_environment() {
        let env = MapEnv::new()
            .with("TEST_USER_USERNAME", "alice")
            .with("TEST_USER_PASSWORD", "secret1");
        let selector = CredentialSelector::new(env.shared());
        let login = generate_login_data(LoginKind::Valid, &selector).unwrap();
        assert_eq!(login.username, "alice");
        assert_eq!(login.password, "secret1");

        let serialized = serde_json::to_string(&login).unwrap();
        assert!(!serialized.contains("secret1"));

        let invalid = generate_login_data(LoginKind::Invalid, &selector).unwrap();
        assert!(invalid.username.starts_with("invalid_"));
        assert_eq!(invalid.expected_error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn login_json_masks_only_real_passwords() {
        let env = MapEnv::new()
            .with("TEST_USER_USERNAME", "alice")
            .with("TEST_USER_PASSWORD", "secret1");
        let selector = CredentialSelector::new(env.shared());

        let valid = generate_login_data(LoginKind::Valid, &selector).unwrap();
        let valid = serde_json::to_value(&valid).unwrap();
        assert_eq!(valid["password"], "***et1");
        assert!(valid.get("expectedError").is_none());

        let invalid = generate_login_data(LoginKind::Invalid, &selector).unwrap();
        let invalid = serde_json::to_value(&invalid).unwrap();
        assert_eq!(invalid["password"], "wrong_password");
        assert_eq!(invalid["expectedError"], "Invalid credentials");
        assert!(invalid.get("role").is_none());
    }
}
