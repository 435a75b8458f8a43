//! Fixture resolution, credentials, record synthesis and validation.

pub mod catalog;
pub mod credentials;
pub mod env;
pub mod factory;
pub mod fixtures;
pub mod logging;
pub mod models;
pub mod validation;

pub use catalog::Catalog;
pub use credentials::{CredentialSelector, CredentialSource, Credentials, Role};
pub use env::{EnvSource, MapEnv, PlaceholderResolver, ProcessEnv, SharedEnv, resolve_placeholders};
pub use factory::{BusinessType, InvalidProductKind, InvalidUserKind, LoginKind, UserFactory};
pub use fixtures::{FixtureKind, FixtureLoader, Row};
pub use models::{ProductOverrides, ProductRecord, UserOverrides, UserRecord};
pub use validation::{FieldSource, RecordValidator, ValidationResult};
