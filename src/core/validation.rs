//! Record validation.
//!
//! Every check is a pure function returning a [`ValidationResult`]; failures
//! are data, never errors. Results compose with [`ValidationResult::merge`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::catalog::Catalog;
use crate::core::fixtures::Row;
use crate::core::models::{ProductRecord, UserRecord};
use crate::error::Result;

// ASCII digits only; `\d` in `regex` also matches other Unicode digits.
static CAS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2,7}-[0-9]{2}-[0-9]$").expect("valid CAS regex"));
static UN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("valid UN regex"));
/// Leading decimal number, as a form's numeric field would read it.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid numeric prefix regex")
});

/// Longest accepted product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 255;
/// Upper bound (inclusive) for specific gravity.
pub const MAX_SPECIFIC_GRAVITY: f64 = 10.0;

/// Fields every user must carry.
pub const DEFAULT_REQUIRED_USER_FIELDS: &[&str] = &["fullName", "username", "email", "password"];

// =============================================================================
// Result
// =============================================================================

/// Outcome of one or more checks. Valid iff `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Concatenate the errors of `other` onto `self`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }
}

impl FromIterator<Self> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        iter.into_iter().fold(Self::valid(), Self::merge)
    }
}

// =============================================================================
// Field access
// =============================================================================

/// Read access to a record's fields by their camelCase form key.
pub trait FieldSource {
    /// Field value rendered as a string, `None` if absent or null.
    fn field(&self, name: &str) -> Option<String>;
}

impl FieldSource for Row {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).and_then(scalar_string)
    }
}

impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).and_then(scalar_string)
    }
}

impl FieldSource for UserRecord {
    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "fullName" => &self.full_name,
            "company" => &self.company,
            "telephone" => &self.telephone,
            "department" => &self.department,
            "accessPermission" => &self.access_permission,
            "username" => &self.username,
            "email" => &self.email,
            "sendingInstructionsEmail" => &self.sending_instructions_email,
            "password" => &self.password,
            "confirmPassword" => &self.confirm_password,
            "status" => &self.status,
            "allowSystemGeneratedHBLs" => &self.allow_system_generated_hbls,
            "description" => &self.description,
            _ => return None,
        };
        Some(value.clone())
    }
}

impl FieldSource for ProductRecord {
    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "productName" => &self.product_name,
            "casNumber" => &self.cas_number,
            "appearance" => &self.appearance,
            "specificGravity" => &self.specific_gravity,
            "productType" => &self.product_type,
            "businessType" => &self.business_type,
            "unNumber" => &self.un_number,
            "status" => &self.status,
            "hazardClass" => &self.hazard_class,
            "packingGroup" => &self.packing_group,
            "properShippingName" => &self.proper_shipping_name,
            "technicalName" => &self.technical_name,
            "emergencyPhone" => &self.emergency_phone,
            "description" => &self.description,
            "createdAt" => &self.created_at,
            _ => return None,
        };
        Some(value.clone())
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Present and not just whitespace. Used where a value is required.
fn present<R: FieldSource + ?Sized>(record: &R, name: &str) -> Option<String> {
    record.field(name).filter(|v| !v.trim().is_empty())
}

/// Present and non-empty. Format checks run on whitespace-only values too.
fn supplied<R: FieldSource + ?Sized>(record: &R, name: &str) -> Option<String> {
    record.field(name).filter(|v| !v.is_empty())
}

/// The leading number of `raw` after leading whitespace; `"1.5kg"` reads as
/// `1.5`.
fn leading_number(raw: &str) -> Option<f64> {
    NUMERIC_PREFIX
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

// =============================================================================
// Checks
// =============================================================================

/// Each of `fields` must be present and non-blank.
#[must_use]
pub fn required_fields<R, S>(record: &R, fields: &[S]) -> ValidationResult
where
    R: FieldSource + ?Sized,
    S: AsRef<str>,
{
    ValidationResult::from_errors(
        fields
            .iter()
            .map(AsRef::as_ref)
            .filter(|field| present(record, field).is_none())
            .map(|field| format!("Required field missing: {field}"))
            .collect(),
    )
}

/// `email`, when present, must end in `@{domain}`.
#[must_use]
pub fn email_domain<R: FieldSource + ?Sized>(record: &R, domain: &str) -> ValidationResult {
    match supplied(record, "email") {
        Some(email) if !email.ends_with(&format!("@{domain}")) => {
            ValidationResult::from_errors(vec![format!(
                "Email must use @{domain} domain: {email}"
            )])
        }
        _ => ValidationResult::valid(),
    }
}

/// `field`, when present, must be one of `allowed`.
///
/// `label` names the field in the message: `Invalid {label}: {value}`.
#[must_use]
pub fn member_of<R, S>(record: &R, field: &str, allowed: &[S], label: &str) -> ValidationResult
where
    R: FieldSource + ?Sized,
    S: AsRef<str>,
{
    match supplied(record, field) {
        Some(value) if !allowed.iter().any(|a| a.as_ref() == value) => {
            ValidationResult::from_errors(vec![format!("Invalid {label}: {value}")])
        }
        _ => ValidationResult::valid(),
    }
}

/// Name required and at most [`MAX_PRODUCT_NAME_LEN`] characters.
#[must_use]
pub fn product_name<R: FieldSource + ?Sized>(record: &R) -> ValidationResult {
    match present(record, "productName") {
        None => ValidationResult::from_errors(vec!["Product name is required".to_string()]),
        Some(name) if name.chars().count() > MAX_PRODUCT_NAME_LEN => {
            ValidationResult::from_errors(vec![
                "Product name exceeds maximum length".to_string(),
            ])
        }
        Some(_) => ValidationResult::valid(),
    }
}

/// CAS registry number format, ASCII digits. Empty values pass.
#[must_use]
pub fn cas_number<R: FieldSource + ?Sized>(record: &R) -> ValidationResult {
    pattern_check(record, "casNumber", &CAS_NUMBER, "Invalid CAS number format")
}

/// Four-digit UN number. Empty values pass.
#[must_use]
pub fn un_number<R: FieldSource + ?Sized>(record: &R) -> ValidationResult {
    pattern_check(record, "unNumber", &UN_NUMBER, "Invalid UN number format")
}

/// Specific gravity must start with a number in `(0, 10]`. Empty values
/// pass.
#[must_use]
pub fn specific_gravity<R: FieldSource + ?Sized>(record: &R) -> ValidationResult {
    let Some(raw) = supplied(record, "specificGravity") else {
        return ValidationResult::valid();
    };
    let in_range =
        leading_number(&raw).is_some_and(|sg| sg > 0.0 && sg <= MAX_SPECIFIC_GRAVITY);
    if in_range {
        ValidationResult::valid()
    } else {
        ValidationResult::from_errors(vec!["Invalid specific gravity value".to_string()])
    }
}

fn pattern_check<R: FieldSource + ?Sized>(
    record: &R,
    field: &str,
    pattern: &Regex,
    message: &str,
) -> ValidationResult {
    match supplied(record, field) {
        Some(value) if !pattern.is_match(&value) => {
            ValidationResult::from_errors(vec![message.to_string()])
        }
        _ => ValidationResult::valid(),
    }
}

/// All product checks, in form order.
#[must_use]
pub fn validate_product<R: FieldSource + ?Sized>(record: &R) -> ValidationResult {
    [
        product_name(record),
        cas_number(record),
        specific_gravity(record),
        un_number(record),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Fixture-backed validator
// =============================================================================

/// Validates records against the fixture catalog and the configured domain.
///
/// Department and access-permission lists are re-read on every call.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    catalog: Catalog,
    email_domain: String,
    required_user_fields: Vec<String>,
}

impl RecordValidator {
    #[must_use]
    pub fn new(catalog: Catalog, email_domain: impl Into<String>) -> Self {
        Self {
            catalog,
            email_domain: email_domain.into(),
            required_user_fields: DEFAULT_REQUIRED_USER_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn with_required_user_fields(mut self, fields: Vec<String>) -> Self {
        self.required_user_fields = fields;
        self
    }

    #[must_use]
    pub fn required_user_fields(&self) -> &[String] {
        &self.required_user_fields
    }

    /// Department, email domain, access permission and required fields.
    ///
    /// # Errors
    ///
    /// Only when the department list cannot be loaded; check failures are
    /// reported in the result.
    pub async fn validate_user<R: FieldSource + ?Sized + Sync>(
        &self,
        record: &R,
    ) -> Result<ValidationResult> {
        let departments = self.catalog.departments().await?;
        let permissions = self.catalog.access_permissions().await;

        Ok([
            member_of(record, "department", departments.as_slice(), "department"),
            email_domain(record, &self.email_domain),
            member_of(
                record,
                "accessPermission",
                permissions.as_slice(),
                "access permission",
            ),
            required_fields(record, self.required_user_fields.as_slice()),
        ]
        .into_iter()
        .collect())
    }

    /// See [`validate_product`].
    #[must_use]
    pub fn validate_product<R: FieldSource + ?Sized>(&self, record: &R) -> ValidationResult {
        validate_product(record)
    }
}
