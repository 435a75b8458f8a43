//! Randomized record synthesis.
//!
//! Records are built from fixed templates plus random field values, then
//! caller overrides are applied. Output is intentionally non-deterministic;
//! tests that need fixed data should load fixtures instead.

pub mod products;
pub mod users;

use rand::Rng;

pub use products::{
    BusinessType, FilterCase, FilterField, FilterTestData, InvalidProductKind,
    edge_case_products, filter_test_data, generate_for_business, generate_invalid_product,
    generate_product, generate_products,
};
pub use users::{
    InvalidUserKind, LoginData, LoginKind, PASSWORD_LENGTH, PASSWORD_SYMBOLS, UserFactory,
    generate_login_data, generate_password,
};

/// Random suffix used in names, `0..1000`.
#[must_use]
pub(crate) fn random_id() -> u32 {
    rand::rng().random_range(0..1000)
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub(crate) fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One entry of a non-empty constant list.
pub(crate) fn pick<'a>(rng: &mut impl Rng, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}
