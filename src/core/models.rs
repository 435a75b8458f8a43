//! Synthesized record types.
//!
//! Field names serialize in camelCase to match the keys the ERP forms and the
//! JSON fixtures use (`fullName`, `casNumber`, ...).

use serde::{Deserialize, Serialize};

// =============================================================================
// User Record
// =============================================================================

/// A user for the user-management screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub full_name: String,
    pub company: String,
    pub telephone: String,
    pub department: String,
    pub access_permission: String,
    pub username: String,
    pub email: String,
    pub sending_instructions_email: String,
    pub password: String,
    pub confirm_password: String,
    pub status: String,
    #[serde(rename = "allowSystemGeneratedHBLs")]
    pub allow_system_generated_hbls: String,
    pub description: String,
}

/// Caller-supplied values applied over a generated [`UserRecord`].
///
/// Every `Some` field replaces the generated value. The merge is shallow:
/// overriding `password` does not touch `confirm_password`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserOverrides {
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub telephone: Option<String>,
    pub department: Option<String>,
    pub access_permission: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub sending_instructions_email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "allowSystemGeneratedHBLs")]
    pub allow_system_generated_hbls: Option<String>,
    pub description: Option<String>,
}

impl UserOverrides {
    /// Overrides that only pin the department.
    #[must_use]
    pub fn department(name: impl Into<String>) -> Self {
        Self {
            department: Some(name.into()),
            ..Self::default()
        }
    }

    /// Apply every set field to `record`.
    pub fn apply(self, record: &mut UserRecord) {
        replace(&mut record.full_name, self.full_name);
        replace(&mut record.company, self.company);
        replace(&mut record.telephone, self.telephone);
        replace(&mut record.department, self.department);
        replace(&mut record.access_permission, self.access_permission);
        replace(&mut record.username, self.username);
        replace(&mut record.email, self.email);
        replace(
            &mut record.sending_instructions_email,
            self.sending_instructions_email,
        );
        replace(&mut record.password, self.password);
        replace(&mut record.confirm_password, self.confirm_password);
        replace(&mut record.status, self.status);
        replace(
            &mut record.allow_system_generated_hbls,
            self.allow_system_generated_hbls,
        );
        replace(&mut record.description, self.description);
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// A (possibly dangerous-goods) product for the product-management screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_name: String,
    /// CAS registry number, `DDD-DD-D`.
    pub cas_number: String,
    pub appearance: String,
    /// Two-decimal string, e.g. `"1.25"`.
    pub specific_gravity: String,
    pub product_type: String,
    pub business_type: String,
    /// Four-digit UN number.
    pub un_number: String,
    /// `P` (pending) or `A` (active).
    pub status: String,
    pub hazard_class: String,
    pub packing_group: String,
    pub proper_shipping_name: String,
    pub technical_name: String,
    pub emergency_phone: String,
    pub description: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Caller-supplied values applied over a generated [`ProductRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductOverrides {
    pub product_name: Option<String>,
    pub cas_number: Option<String>,
    pub appearance: Option<String>,
    pub specific_gravity: Option<String>,
    pub product_type: Option<String>,
    pub business_type: Option<String>,
    pub un_number: Option<String>,
    pub status: Option<String>,
    pub hazard_class: Option<String>,
    pub packing_group: Option<String>,
    pub proper_shipping_name: Option<String>,
    pub technical_name: Option<String>,
    pub emergency_phone: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl ProductOverrides {
    /// Apply every set field to `record`.
    pub fn apply(self, record: &mut ProductRecord) {
        replace(&mut record.product_name, self.product_name);
        replace(&mut record.cas_number, self.cas_number);
        replace(&mut record.appearance, self.appearance);
        replace(&mut record.specific_gravity, self.specific_gravity);
        replace(&mut record.product_type, self.product_type);
        replace(&mut record.business_type, self.business_type);
        replace(&mut record.un_number, self.un_number);
        replace(&mut record.status, self.status);
        replace(&mut record.hazard_class, self.hazard_class);
        replace(&mut record.packing_group, self.packing_group);
        replace(&mut record.proper_shipping_name, self.proper_shipping_name);
        replace(&mut record.technical_name, self.technical_name);
        replace(&mut record.emergency_phone, self.emergency_phone);
        replace(&mut record.description, self.description);
        replace(&mut record.created_at, self.created_at);
    }
}

fn replace(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            full_name: "Test User 1".to_string(),
            company: "Test Company 1".to_string(),
            telephone: "+44 1234567890".to_string(),
            department: "Sales".to_string(),
            access_permission: "Full Access".to_string(),
            username: "user1_1".to_string(),
            email: "user1@digitalmesh.com".to_string(),
            sending_instructions_email: "user1@digitalmesh.com".to_string(),
            password: "Aa1!aaaa".to_string(),
            confirm_password: "Aa1!aaaa".to_string(),
            status: "Active".to_string(),
            allow_system_generated_hbls: "No".to_string(),
            description: "d".to_string(),
        }
    }

    #[test]
    fn user_serializes_with_form_keys() {
        let value = serde_json::to_value(user()).unwrap();
        assert_eq!(value["fullName"], "Test User 1");
        assert_eq!(value["allowSystemGeneratedHBLs"], "No");
        assert_eq!(value["confirmPassword"], "Aa1!aaaa");
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let mut record = user();
        UserOverrides {
            email: Some("x@other.com".to_string()),
            ..UserOverrides::default()
        }
        .apply(&mut record);
        assert_eq!(record.email, "x@other.com");
        assert_eq!(record.full_name, "Test User 1");
    }

    #[test]
    fn overrides_reject_unknown_keys() {
        let err = serde_json::from_str::<UserOverrides>(r#"{"fullname": "typo"}"#);
        assert!(err.is_err());
        let ok: UserOverrides = serde_json::from_str(r#"{"fullName": "Jane"}"#).unwrap();
        assert_eq!(ok.full_name.as_deref(), Some("Jane"));
    }
}
