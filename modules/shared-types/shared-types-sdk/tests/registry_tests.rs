#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for name-based validation through the type registry

mod common;

use serde_json::json;
use smartlearn_errors::Problem;
use shared_types_sdk::{RegistryError, TypeRegistry, ValidationConfig};

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_every_record_resolves() {
    let registry = TypeRegistry::global();
    for name in registry.type_names() {
        assert!(registry.schema(name).is_ok(), "{name}");
        assert_eq!(registry.get(name).unwrap().name(), name);
    }
}

#[test]
fn test_unknown_name_rejected() {
    let err = TypeRegistry::global()
        .validate("SkillLevels", &common::skill_level())
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownType(ref name) if name == "SkillLevels"));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_by_name() {
    let registry = TypeRegistry::global();
    let canonical = registry.validate("User", &common::user()).unwrap();
    assert_eq!(canonical, common::user());

    let err = registry
        .validate("SearchResult", &common::search_result(1.5))
        .unwrap_err();
    let err = err.validation_error().unwrap();
    assert_eq!(err.record(), "SearchResult");
    assert_eq!(err.violations()[0].field, "relevance_score");
}

#[test]
fn test_strict_registry_rejects_extra_keys() {
    let registry = TypeRegistry::with_config(ValidationConfig::new().with_deny_unknown_fields(true));
    let mut payload = common::feedback();
    payload["source"] = json!("mobile");
    assert!(registry.validate("UserFeedback", &payload).is_err());
    assert!(TypeRegistry::global().validate("UserFeedback", &payload).is_ok());
}

// =============================================================================
// Problem Conversion Tests
// =============================================================================

#[test]
fn test_validation_failure_as_problem() {
    let err = TypeRegistry::global()
        .validate(
            "UserFeedback",
            &json!({"rating": 6, "helpful": "yes", "clarity_rating": 3}),
        )
        .unwrap_err();
    let problem: Problem = err.into();
    assert_eq!(problem.status.as_u16(), 422);
    assert_eq!(problem.violation_count(), 3);

    let errors = problem.errors.unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["rating", "helpful", "accuracy_rating"]);
    assert_eq!(errors[2].code.as_deref(), Some("required"));
    assert!(errors[2].value.is_none());
}

#[test]
fn test_unknown_type_as_problem() {
    let err = TypeRegistry::global().validate("Nope", &json!({})).unwrap_err();
    let problem: Problem = err.into();
    assert_eq!(problem.status.as_u16(), 404);
    assert_eq!(problem.code, "UNKNOWN_TYPE");
}
