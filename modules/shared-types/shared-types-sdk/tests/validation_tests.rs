#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for field-level validation rules

mod common;

use serde_json::json;
use shared_types_sdk::{
    Constraint, GenerationContext, LearningInteraction, PaginatedResponse, Record, SearchResult,
    SkillLevel, User, UserFeedback, ValidationConfig,
};

fn feedback_with_rating(rating: &serde_json::Value) -> serde_json::Value {
    let mut payload = common::feedback();
    payload["rating"] = rating.clone();
    payload
}

// =============================================================================
// Rating Tests
// =============================================================================

#[test]
fn test_ratings_in_range_accepted() {
    for rating in 1..=5 {
        let feedback = UserFeedback::from_json(&feedback_with_rating(&json!(rating))).unwrap();
        assert_eq!(feedback.rating, rating);
    }
}

#[test]
fn test_ratings_out_of_range_rejected() {
    for rating in [json!(0), json!(6), json!(-1)] {
        let err = UserFeedback::from_json(&feedback_with_rating(&rating)).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.violations()[0].field, "rating");
        assert_eq!(err.violations()[0].constraint, Constraint::range(1.0, 5.0));
    }
}

#[test]
fn test_fractional_rating_rejected() {
    let err = UserFeedback::from_json(&feedback_with_rating(&json!(3.5))).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.violations()[0].constraint, Constraint::expected("integer"));
}

#[test]
fn test_whole_float_rating_accepted() {
    let feedback = UserFeedback::from_json(&feedback_with_rating(&json!(5.0))).unwrap();
    assert_eq!(feedback.rating, 5);
    assert_eq!(feedback.to_json().unwrap()["rating"], json!(5));

    let err = UserFeedback::from_json(&feedback_with_rating(&json!(6.0))).unwrap_err();
    assert_eq!(err.violations()[0].constraint, Constraint::range(1.0, 5.0));
}

#[test]
fn test_feedback_rating_six_single_violation() {
    let err = UserFeedback::from_json(&json!({
        "rating": 6,
        "helpful": true,
        "clarity_rating": 3,
        "accuracy_rating": 4
    }))
    .unwrap_err();
    assert_eq!(err.len(), 1);
    let violation = err.field("rating").unwrap();
    assert_eq!(violation.value, Some(json!(6)));
    assert_eq!(violation.message, "must be between 1 and 5");
}

// =============================================================================
// Score Tests
// =============================================================================

#[test]
fn test_score_boundaries() {
    for score in [0.0, 1.0] {
        assert!(SearchResult::from_json(&common::search_result(score)).is_ok());
    }
    for score in [-0.0001, 1.0001] {
        let err = SearchResult::from_json(&common::search_result(score)).unwrap_err();
        assert_eq!(err.violations()[0].field, "relevance_score");
    }
}

#[test]
fn test_confidence_boundaries() {
    let mut payload = common::skill_level();
    payload["confidence"] = json!(1.2);
    let err = SkillLevel::from_json(&payload).unwrap_err();
    assert_eq!(err.violations()[0].field, "confidence");
    assert_eq!(err.violations()[0].message, "must be between 0 and 1");
}

#[test]
fn test_threshold_boundaries() {
    let payload = json!({
        "query": "q",
        "retrieved_documents": [common::search_result(0.5)],
        "context_text": "c",
        "relevance_threshold": -0.5
    });
    let err = GenerationContext::from_json(&payload).unwrap_err();
    assert_eq!(err.violations()[0].field, "relevance_threshold");
}

// =============================================================================
// Enum Tests
// =============================================================================

#[test]
fn test_unknown_enum_literal_rejected() {
    let mut payload = common::skill_level();
    payload["level"] = json!("expert");
    let err = SkillLevel::from_json(&payload).unwrap_err();
    assert_eq!(err.len(), 1);
    let violation = err.field("level").unwrap();
    assert_eq!(violation.constraint.code(), "enum");
    assert_eq!(
        violation.message,
        "expected one of 'beginner', 'intermediate', 'advanced'"
    );
}

#[test]
fn test_enum_matching_is_case_sensitive() {
    let mut payload = common::skill_level();
    payload["level"] = json!("Advanced");
    assert!(SkillLevel::from_json(&payload).is_err());
}

// =============================================================================
// Collect-All Tests
// =============================================================================

#[test]
fn test_all_violations_reported_with_nested_paths() {
    let mut payload = common::user();
    payload["email"] = json!(42);
    payload["learning_context"]["learning_history"][0]["feedback"]["rating"] = json!(9);
    payload["learning_context"]["skill_levels"]["recursion"]["confidence"] = json!(-1);
    payload["preferences"]["notification_settings"]["push_notifications"] = json!("yes");

    let err = User::from_json(&payload).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "email",
            "preferences.notification_settings.push_notifications",
            r#"learning_context.skill_levels["recursion"].confidence"#,
            "learning_context.learning_history[0].feedback.rating",
        ]
    );
}

#[test]
fn test_missing_required_fields() {
    let err = LearningInteraction::from_json(&json!({"id": "int-1"})).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["user_id", "type", "query", "response", "timestamp", "processing_time"]
    );
    assert!(err.violations().iter().all(|v| v.constraint == Constraint::Required));
}

#[test]
fn test_non_object_payload_rejected() {
    let err = SkillLevel::from_json(&json!("recursion")).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.violations()[0].field, "$");
}

// =============================================================================
// Defaults and Unknown Fields Tests
// =============================================================================

#[test]
fn test_paginated_response_any_page_limit() {
    for (page, limit) in [(1, 10), (0, 0), (500, 1), (-1, -1)] {
        let response = PaginatedResponse::from_json(&json!({
            "data": [],
            "total": 0,
            "page": page,
            "limit": limit,
            "has_next": false,
            "has_prev": false
        }))
        .unwrap();
        assert_eq!((response.page, response.limit), (page, limit));
    }
}

#[test]
fn test_paginated_total_overflow_is_range_violation() {
    let err = PaginatedResponse::from_json(&json!({
        "data": [],
        "total": u64::MAX,
        "page": 1,
        "limit": 10,
        "has_next": false,
        "has_prev": false
    }))
    .unwrap_err();
    assert_eq!(err.len(), 1);
    let violation = err.field("total").unwrap();
    assert_eq!(violation.constraint.code(), "range");
    assert!(!violation.message.contains("expected integer"), "{}", violation.message);
}

#[test]
fn test_unknown_fields_ignored_by_default() {
    let mut payload = common::skill_level();
    payload["extra"] = json!({"anything": true});
    assert!(SkillLevel::from_json(&payload).is_ok());
}

#[test]
fn test_unknown_fields_denied_in_strict_mode() {
    let mut payload = common::user();
    payload["nickname"] = json!("ada");
    payload["learning_context"]["learning_history"][0]["mood"] = json!("curious");

    let strict = ValidationConfig::new().with_deny_unknown_fields(true);
    let err = User::from_json_with(&payload, strict).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["learning_context.learning_history[0].mood", "nickname"]
    );
}

#[test]
fn test_null_defaulted_field_rejected() {
    let mut payload = common::user();
    payload["preferences"]["learning_goals"] = serde_json::Value::Null;
    let err = User::from_json(&payload).unwrap_err();
    assert_eq!(err.violations()[0].field, "preferences.learning_goals");
}

#[test]
fn test_null_optional_field_is_absent() {
    let mut payload = common::feedback();
    payload["comments"] = serde_json::Value::Null;
    let feedback = UserFeedback::from_json(&payload).unwrap();
    assert!(feedback.comments.is_none());
}

// =============================================================================
// In-Process Construction Tests
// =============================================================================

#[test]
fn test_validate_in_process_instance() {
    let mut skill = SkillLevel::from_json(&common::skill_level()).unwrap();
    assert!(skill.validate().is_ok());

    skill.confidence = 1.5;
    let err = skill.validate().unwrap_err();
    assert_eq!(err.violations()[0].field, "confidence");

    skill.confidence = f64::NAN;
    assert!(skill.validate().is_err());
}

#[test]
fn test_serde_deserialize_validates() {
    let ok: SkillLevel = serde_json::from_value(common::skill_level()).unwrap();
    assert_eq!(ok.topic, "recursion");

    let err = serde_json::from_str::<UserFeedback>(
        r#"{"rating": 0, "helpful": "yes", "clarity_rating": 3, "accuracy_rating": 4}"#,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("2 validation errors for UserFeedback"), "{message}");
}
