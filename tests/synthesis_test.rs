//! Record synthesis against fixture catalogs, checked by the validators.

use erpdata::core::factory::{
    BusinessType, InvalidProductKind, InvalidUserKind, PASSWORD_SYMBOLS, UserFactory,
    edge_case_products, generate_for_business, generate_invalid_product, generate_products,
};
use erpdata::core::models::UserOverrides;
use erpdata::core::validation::{RecordValidator, email_domain};
use erpdata::test_utils::{SAMPLE_DEPARTMENTS, TestDataDir, test_env};
use erpdata::{DataError, assert_invalid_with, assert_valid};
use serde_json::json;

fn factory(data: &TestDataDir) -> UserFactory {
    UserFactory::new(data.catalog(test_env().shared()), "digitalmesh.com")
}

fn validator(data: &TestDataDir) -> RecordValidator {
    RecordValidator::new(data.catalog(test_env().shared()), "digitalmesh.com")
}

#[tokio::test]
async fn generated_departments_come_from_the_catalog() {
    let data = TestDataDir::with_standard_fixtures();
    let users = factory(&data).generate_users(50).await.unwrap();

    assert_eq!(users.len(), 50);
    for user in &users {
        assert!(
            SAMPLE_DEPARTMENTS.contains(&user.department.as_str()),
            "unexpected department {}",
            user.department
        );
    }
}

#[tokio::test]
async fn departments_track_fixture_edits() {
    let data = TestDataDir::with_standard_fixtures();
    let factory = factory(&data);

    data.set_departments(&["Warehouse"]);
    let user = factory.generate_user(UserOverrides::default()).await.unwrap();
    assert_eq!(user.department, "Warehouse");
}

#[tokio::test]
async fn generated_passwords_meet_policy() {
    let data = TestDataDir::with_standard_fixtures();
    for user in factory(&data).generate_users(25).await.unwrap() {
        let password = &user.password;
        assert!(password.len() >= 8);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()), "{password}");
        assert!(password.chars().any(|c| c.is_ascii_lowercase()), "{password}");
        assert!(password.chars().any(|c| c.is_ascii_digit()), "{password}");
        assert!(password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)), "{password}");
        assert_eq!(user.confirm_password, user.password);
    }
}

#[tokio::test]
async fn unknown_department_is_rejected() {
    let data = TestDataDir::with_standard_fixtures();
    let err = factory(&data)
        .generate_user_for_department("NotARealDept")
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::InvalidDepartment { .. }));
    assert!(err.to_string().contains("Invalid department: NotARealDept"));
    assert!(err.to_string().contains("Customer Service"));
}

#[tokio::test]
async fn empty_catalog_cannot_pick_a_department() {
    let data = TestDataDir::with_standard_fixtures();
    data.set_departments(&[]);

    let err = factory(&data).generate_users(1).await.unwrap_err();
    assert!(matches!(err, DataError::NoDepartments { .. }), "{err:?}");
}

#[tokio::test]
async fn generated_users_pass_validation() {
    let data = TestDataDir::with_standard_fixtures();
    let factory = factory(&data);
    let validator = validator(&data);

    for user in factory.generate_users(10).await.unwrap() {
        assert_valid!(validator.validate_user(&user).await.unwrap());
    }
    let user = factory
        .generate_user_for_department("Finance")
        .await
        .unwrap();
    assert_valid!(validator.validate_user(&user).await.unwrap());
}

#[tokio::test]
async fn invalid_users_fail_validation() {
    let data = TestDataDir::with_standard_fixtures();
    let factory = factory(&data);
    let validator = validator(&data);

    let user = factory
        .generate_invalid_user(InvalidUserKind::InvalidEmail)
        .await
        .unwrap();
    assert_invalid_with!(
        validator.validate_user(&user).await.unwrap(),
        "Email must use @digitalmesh.com domain: invalid-email-format"
    );

    let user = factory
        .generate_invalid_user(InvalidUserKind::MissingRequired)
        .await
        .unwrap();
    assert_invalid_with!(
        validator.validate_user(&user).await.unwrap(),
        "Required field missing: fullName"
    );
}

#[tokio::test]
async fn wrong_email_domain_is_reported() {
    let data = TestDataDir::with_standard_fixtures();
    let record = json!({"email": "a@wrong.com"});

    let result = email_domain(&record, "digitalmesh.com");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"isValid": false, "errors": ["Email must use @digitalmesh.com domain: a@wrong.com"]})
    );

    let result = validator(&data)
        .with_required_user_fields(Vec::new())
        .validate_user(&record)
        .await
        .unwrap();
    assert_eq!(
        result.errors,
        ["Email must use @digitalmesh.com domain: a@wrong.com"]
    );
}

#[tokio::test]
async fn department_and_permission_are_checked_against_fixture() {
    let data = TestDataDir::with_standard_fixtures();
    let record = json!({
        "fullName": "Jo",
        "username": "jo",
        "email": "jo@digitalmesh.com",
        "password": "Pw1!aaaa",
        "department": "Marketing",
        "accessPermission": "Root"
    });

    let result = validator(&data).validate_user(&record).await.unwrap();
    assert_eq!(
        result.errors,
        ["Invalid department: Marketing", "Invalid access permission: Root"]
    );
}

#[test]
fn generated_products_pass_validation() {
    for product in generate_products(20) {
        assert_valid!(erpdata::core::validation::validate_product(&product));
    }
    for business in BusinessType::ALL {
        let product = generate_for_business(*business);
        assert_eq!(product.business_type, business.code());
        assert_valid!(erpdata::core::validation::validate_product(&product));
    }
}

#[test]
fn invalid_products_fail_validation() {
    use erpdata::core::validation::validate_product;

    assert_invalid_with!(
        validate_product(&generate_invalid_product(InvalidProductKind::MissingName)),
        "Product name is required"
    );
    assert_invalid_with!(
        validate_product(&generate_invalid_product(InvalidProductKind::InvalidCas)),
        "Invalid CAS number format"
    );
    assert_invalid_with!(
        validate_product(&generate_invalid_product(InvalidProductKind::NegativeGravity)),
        "Invalid specific gravity value"
    );
    assert_invalid_with!(
        validate_product(&generate_invalid_product(InvalidProductKind::LongName)),
        "Product name exceeds maximum length"
    );
}

#[test]
fn edge_case_products_are_accepted() {
    let products = edge_case_products();
    assert_eq!(products.len(), 5);
    for product in &products {
        assert_valid!(erpdata::core::validation::validate_product(product));
    }
}
