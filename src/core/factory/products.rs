//! Product record synthesis.
//!
//! Products are plain random values; no fixture list constrains them.

use rand::Rng;
use serde::Serialize;

use super::{pick, random_id};
use crate::core::models::{ProductOverrides, ProductRecord};

/// Appearance vocabulary for generated products.
pub const APPEARANCES: &[&str] = &[
    "White crystalline powder",
    "Clear colorless liquid",
    "Yellow viscous liquid",
    "Off-white granules",
    "Transparent solution",
    "Light brown powder",
    "Colorless gas",
    "Blue crystalline solid",
    "Amber liquid",
    "White flakes",
];

const PACKING_GROUPS: &[&str] = &["I", "II", "III"];
const EMERGENCY_PHONE: &str = "+44 20 1234 5678";

/// Random CAS-like number, `DDD-DD-D`.
#[must_use]
pub fn cas_number() -> String {
    let mut rng = rand::rng();
    format!(
        "{}-{}-{}",
        rng.random_range(100..=999),
        rng.random_range(10..=99),
        rng.random_range(1..=9)
    )
}

/// Random four-digit UN number.
#[must_use]
pub fn un_number() -> String {
    rand::rng().random_range(1000..=9999).to_string()
}

/// Random specific gravity in `[0.1, 3.0]`, two decimals.
#[must_use]
pub fn specific_gravity() -> String {
    format!("{:.2}", rand::rng().random_range(0.1..=3.0_f64))
}

#[must_use]
pub fn appearance() -> String {
    pick(&mut rand::rng(), APPEARANCES).to_string()
}

/// Hazard class `1`..=`9`.
#[must_use]
pub fn hazard_class() -> String {
    rand::rng().random_range(1..=9).to_string()
}

#[must_use]
pub fn packing_group() -> String {
    pick(&mut rand::rng(), PACKING_GROUPS).to_string()
}

fn template() -> ProductRecord {
    let id = random_id();
    ProductRecord {
        product_name: format!("Test Product {id}"),
        cas_number: cas_number(),
        appearance: appearance(),
        specific_gravity: specific_gravity(),
        product_type: "Product".to_string(),
        business_type: "DED".to_string(),
        un_number: un_number(),
        status: "P".to_string(),
        hazard_class: hazard_class(),
        packing_group: packing_group(),
        proper_shipping_name: format!("Test Chemical {id}"),
        technical_name: format!("Technical Name {id}"),
        emergency_phone: EMERGENCY_PHONE.to_string(),
        description: format!("Auto-generated test product {id}"),
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Generate a product, applying `overrides` last.
#[must_use]
pub fn generate_product(overrides: ProductOverrides) -> ProductRecord {
    let mut record = template();
    overrides.apply(&mut record);
    record
}

/// Generate `count` products named `Bulk Test Product 1..=count`.
#[must_use]
pub fn generate_products(count: usize) -> Vec<ProductRecord> {
    (1..=count)
        .map(|i| {
            generate_product(ProductOverrides {
                product_name: Some(format!("Bulk Test Product {i}")),
                ..ProductOverrides::default()
            })
        })
        .collect()
}

/// Line of business a product is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    /// Dangerous goods.
    Ded,
    /// Sea freight; registered as a service.
    Imo,
    Retail,
}

impl BusinessType {
    pub const ALL: &'static [Self] = &[Self::Ded, Self::Imo, Self::Retail];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ded => "DED",
            Self::Imo => "IMO",
            Self::Retail => "RETAIL",
        }
    }

    /// Case-insensitive parse of a business code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.code().eq_ignore_ascii_case(code))
    }
}

/// Generate a product shaped for a line of business.
#[must_use]
pub fn generate_for_business(business: BusinessType) -> ProductRecord {
    let overrides = match business {
        BusinessType::Ded => ProductOverrides {
            product_type: Some("Product".to_string()),
            status: Some("P".to_string()),
            hazard_class: Some(hazard_class()),
            ..ProductOverrides::default()
        },
        BusinessType::Imo => ProductOverrides {
            product_type: Some("Service".to_string()),
            status: Some("A".to_string()),
            un_number: Some(un_number()),
            ..ProductOverrides::default()
        },
        BusinessType::Retail => ProductOverrides {
            product_type: Some("Product".to_string()),
            status: Some("A".to_string()),
            specific_gravity: Some("1.00".to_string()),
            ..ProductOverrides::default()
        },
    };
    generate_product(ProductOverrides {
        business_type: Some(business.code().to_string()),
        ..overrides
    })
}

/// Kinds of deliberately broken products for negative-path tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidProductKind {
    MissingName,
    InvalidCas,
    NegativeGravity,
    /// A 300-character name.
    LongName,
    /// Script and image markup in text fields.
    MarkupInjection,
}

/// Generate a product that fails validation in a specific way.
#[must_use]
pub fn generate_invalid_product(kind: InvalidProductKind) -> ProductRecord {
    let overrides = match kind {
        InvalidProductKind::MissingName => ProductOverrides {
            product_name: Some(String::new()),
            ..ProductOverrides::default()
        },
        InvalidProductKind::InvalidCas => ProductOverrides {
            cas_number: Some("invalid-cas-format".to_string()),
            ..ProductOverrides::default()
        },
        InvalidProductKind::NegativeGravity => ProductOverrides {
            specific_gravity: Some("-1.5".to_string()),
            ..ProductOverrides::default()
        },
        InvalidProductKind::LongName => ProductOverrides {
            product_name: Some("A".repeat(300)),
            ..ProductOverrides::default()
        },
        InvalidProductKind::MarkupInjection => ProductOverrides {
            product_name: Some(r#"<script>alert("XSS Test")</script>Test Product"#.to_string()),
            appearance: Some(r#"<img src="x" onerror="alert('XSS')">"#.to_string()),
            ..ProductOverrides::default()
        },
    };
    generate_product(overrides)
}

/// Products at the edges of what the forms accept: non-Latin text, range
/// boundaries, punctuation, and a minimal record without a CAS number.
#[must_use]
pub fn edge_case_products() -> Vec<ProductRecord> {
    let named = |name: &str, appearance: &str| ProductOverrides {
        product_name: Some(name.to_string()),
        appearance: Some(appearance.to_string()),
        ..ProductOverrides::default()
    };

    vec![
        generate_product(named("Продукт тест 测试产品 منتج", "Test with unicode")),
        generate_product(ProductOverrides {
            product_name: Some("Boundary Test".to_string()),
            specific_gravity: Some("0.01".to_string()),
            un_number: Some("1000".to_string()),
            ..ProductOverrides::default()
        }),
        generate_product(ProductOverrides {
            product_name: Some("Max Value Test".to_string()),
            specific_gravity: Some("2.99".to_string()),
            un_number: Some("9999".to_string()),
            ..ProductOverrides::default()
        }),
        generate_product(named("Special!@#$%^&*()_+", "Test with special chars")),
        generate_product(ProductOverrides {
            cas_number: Some(String::new()),
            ..named("Minimal Required Only", "Basic test")
        }),
    ]
}

// =============================================================================
// Filter cases
// =============================================================================

/// Product-list column a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    ProductName,
    CasNumber,
    Appearance,
}

/// One filter to type into the product list, with the expected row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCase {
    #[serde(rename = "type")]
    pub filter_type: FilterField,
    pub value: String,
    pub expected_results: usize,
    pub description: String,
}

impl FilterCase {
    /// Substring match on names and appearances, exact match on CAS numbers.
    #[must_use]
    pub fn matches(&self, product: &ProductRecord) -> bool {
        match self.filter_type {
            FilterField::ProductName => product.product_name.contains(&self.value),
            FilterField::Appearance => product.appearance.contains(&self.value),
            FilterField::CasNumber => product.cas_number == self.value,
        }
    }
}

/// Known products plus the filters to run against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTestData {
    pub filters: Vec<FilterCase>,
    pub products: Vec<ProductRecord>,
}

/// Three products with fixed names, CAS numbers and appearances, and four
/// filters over them, one of which matches nothing.
#[must_use]
pub fn filter_test_data() -> FilterTestData {
    let product = |name: &str, cas: &str, appearance: &str| {
        generate_product(ProductOverrides {
            product_name: Some(name.to_string()),
            cas_number: Some(cas.to_string()),
            appearance: Some(appearance.to_string()),
            ..ProductOverrides::default()
        })
    };
    let filter = |filter_type, value: &str, expected_results, description: &str| FilterCase {
        filter_type,
        value: value.to_string(),
        expected_results,
        description: description.to_string(),
    };

    FilterTestData {
        products: vec![
            product("Propanediol Test", "504-63-2", "Clear liquid"),
            product("Acetone Chemical", "67-64-1", "Colorless liquid"),
            product("Methanol Solution", "67-56-1", "Clear solution"),
        ],
        filters: vec![
            filter(FilterField::ProductName, "Propanediol", 1, "Filter by product name"),
            filter(FilterField::CasNumber, "67-64-1", 1, "Filter by CAS number"),
            filter(
                FilterField::Appearance,
                "liquid",
                2,
                "Filter by appearance containing \"liquid\"",
            ),
            filter(FilterField::ProductName, "NonExistent", 0, "Filter with no results"),
        ],
    }
}
