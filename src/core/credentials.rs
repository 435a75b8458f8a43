//! Role-based credential selection from the environment.
//!
//! Credentials never live in source or fixtures. Each role maps to a fixed
//! pair of environment variables; an incomplete pair falls back to the
//! default (test user) pair.

use std::fmt;

use serde::Serialize;

use crate::core::env::SharedEnv;
use crate::error::{DataError, Result};

/// Logical user roles known to the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Regular,
    Default,
}

impl Role {
    pub const ALL: &'static [Self] = &[Self::Admin, Self::Manager, Self::Regular, Self::Default];

    /// Parse a role name (case-insensitive). Unknown names map to `Default`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "admin" | "administrator" => Self::Admin,
            "manager" => Self::Manager,
            "regular" | "user" => Self::Regular,
            _ => Self::Default,
        }
    }

    /// The `(username, password)` variable names for this role.
    #[must_use]
    pub const fn env_vars(self) -> (&'static str, &'static str) {
        match self {
            Self::Admin => ("ADMIN_USERNAME", "ADMIN_PASSWORD"),
            Self::Manager => ("MANAGER_USERNAME", "MANAGER_PASSWORD"),
            Self::Regular => ("REGULAR_USER_USERNAME", "REGULAR_USER_PASSWORD"),
            Self::Default => ("TEST_USER_USERNAME", "TEST_USER_PASSWORD"),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Regular => "regular",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A username/password pair. `Debug` masks the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// `***` followed by the last three characters of the password.
    #[must_use]
    pub fn masked_password(&self) -> String {
        mask_password(&self.password)
    }
}

/// `***` followed by the last three characters of `password`.
#[must_use]
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(3)..].iter().collect();
    format!("***{tail}")
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Which pair a lookup was satisfied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The requested role's own variables.
    Role(Role),
    /// The default pair, after the role's pair was incomplete.
    Fallback,
}

/// Maps roles to environment-backed credentials.
#[derive(Clone)]
pub struct CredentialSelector {
    env: SharedEnv,
}

impl fmt::Debug for CredentialSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSelector").finish_non_exhaustive()
    }
}

impl CredentialSelector {
    #[must_use]
    pub fn new(env: SharedEnv) -> Self {
        Self { env }
    }

    /// Credentials for a role name such as `admin`, `manager` or `test`.
    ///
    /// Re-reads the environment on every call.
    ///
    /// # Errors
    ///
    /// [`DataError::CredentialsNotConfigured`] if neither the role's pair nor
    /// the default pair is complete.
    pub fn credentials(&self, role: &str) -> Result<Credentials> {
        self.resolve(role).map(|(creds, _)| creds)
    }

    /// Like [`Self::credentials`], also reporting where the pair came from.
    ///
    /// # Errors
    ///
    /// See [`Self::credentials`].
    pub fn resolve(&self, role_name: &str) -> Result<(Credentials, CredentialSource)> {
        let role = Role::from_name(role_name);
        if let Some(creds) = self.pair(role) {
            return Ok((creds, CredentialSource::Role(role)));
        }

        if role != Role::Default {
            tracing::debug!(role = %role, "Role credentials incomplete, using default pair");
            if let Some(creds) = self.pair(Role::Default) {
                return Ok((creds, CredentialSource::Fallback));
            }
        }

        let (username_var, password_var) = Role::Default.env_vars();
        Err(DataError::CredentialsNotConfigured {
            role: role_name.to_string(),
            username_var: username_var.to_string(),
            password_var: password_var.to_string(),
        })
    }

    fn pair(&self, role: Role) -> Option<Credentials> {
        let (user_var, pass_var) = role.env_vars();
        Some(Credentials {
            username: self.env.non_empty(user_var)?,
            password: self.env.non_empty(pass_var)?,
        })
    }
}
