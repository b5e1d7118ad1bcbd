#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared payload fixtures for shared-types integration tests

use serde_json::{Value, json};

pub fn skill_level() -> Value {
    json!({
        "topic": "recursion",
        "level": "advanced",
        "confidence": 0.85,
        "last_assessed": "2024-01-01T00:00:00Z"
    })
}

pub fn feedback() -> Value {
    json!({
        "rating": 5,
        "helpful": true,
        "clarity_rating": 4,
        "accuracy_rating": 5,
        "comments": "clear and correct"
    })
}

pub fn interaction() -> Value {
    json!({
        "id": "int-1",
        "user_id": "u-1",
        "type": "concept_explanation",
        "query": "What is tail recursion?",
        "response": "A recursive call in tail position.",
        "context_used": ["doc-7", "doc-9"],
        "feedback": feedback(),
        "timestamp": "2024-03-01T12:00:00Z",
        "processing_time": 0.42
    })
}

/// A user with every field spelled out, so the payload is already canonical.
pub fn user() -> Value {
    json!({
        "id": "u-1",
        "email": "ada@example.com",
        "username": "ada",
        "created_at": "2023-12-01T09:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "preferences": {
            "explanation_style": "example-heavy",
            "preferred_languages": ["rust", "python"],
            "learning_goals": ["async"],
            "notification_settings": {
                "email_notifications": false,
                "push_notifications": true,
                "learning_reminders": true,
                "progress_updates": false
            }
        },
        "learning_context": {
            "skill_levels": {"recursion": skill_level()},
            "learning_history": [interaction()],
            "current_focus_areas": ["closures"],
            "estimated_expertise": {
                "overall_level": "intermediate",
                "domain_expertise": {"rust": 0.6, "sql": 0.25}
            }
        }
    })
}

pub fn document_metadata() -> Value {
    json!({
        "author": "docs team",
        "created_date": "2023-06-01T00:00:00Z",
        "last_updated": "2024-01-15T08:30:00Z",
        "version": "1.2",
        "language": "rust"
    })
}

pub fn search_result(score: f64) -> Value {
    json!({
        "document_id": "doc-1",
        "title": "Ownership",
        "content_snippet": "Each value in Rust has an owner.",
        "relevance_score": score,
        "metadata": document_metadata()
    })
}
