//! Users, their preferences, and what the platform knows about their skills.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use smartlearn_utils::SecretString;

use super::enums::{DifficultyLevel, ExplanationStyle, InteractionType};
use crate::decode::{Decode, DecodeContext, decode_object, non_negative, rating, unit_interval};

#[allow(clippy::struct_excessive_bools)] // one flag per notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NotificationSettings {
    #[serde(default = "enabled")]
    pub email_notifications: bool,
    #[serde(default = "enabled")]
    pub push_notifications: bool,
    #[serde(default = "enabled")]
    pub learning_reminders: bool,
    #[serde(default = "enabled")]
    pub progress_updates: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            learning_reminders: true,
            progress_updates: true,
        }
    }
}

impl Decode for NotificationSettings {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let email_notifications = r.or_else("email_notifications", enabled);
            let push_notifications = r.or_else("push_notifications", enabled);
            let learning_reminders = r.or_else("learning_reminders", enabled);
            let progress_updates = r.or_else("progress_updates", enabled);
            Some(Self {
                email_notifications: email_notifications?,
                push_notifications: push_notifications?,
                learning_reminders: learning_reminders?,
                progress_updates: progress_updates?,
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct UserPreferences {
    #[serde(default)]
    pub explanation_style: ExplanationStyle,
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub notification_settings: NotificationSettings,
}

impl Decode for UserPreferences {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let explanation_style = r.or_else("explanation_style", ExplanationStyle::default);
            let preferred_languages = r.or_default("preferred_languages");
            let learning_goals = r.or_default("learning_goals");
            let notification_settings = r.or_default("notification_settings");
            Some(Self {
                explanation_style: explanation_style?,
                preferred_languages: preferred_languages?,
                learning_goals: learning_goals?,
                notification_settings: notification_settings?,
            })
        })
    }
}

/// Assessed proficiency in one topic.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SkillLevel {
    pub topic: String,
    pub level: DifficultyLevel,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
    pub last_assessed: DateTime<Utc>,
}

impl Decode for SkillLevel {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let topic = r.required("topic");
            let level = r.required("level");
            let confidence = r.required_with("confidence", unit_interval);
            let last_assessed = r.required("last_assessed");
            Some(Self {
                topic: topic?,
                level: level?,
                confidence: confidence?,
                last_assessed: last_assessed?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ExpertiseLevel {
    pub overall_level: DifficultyLevel,
    /// Domain name to expertise score in `[0, 1]`.
    #[serde(default)]
    pub domain_expertise: BTreeMap<String, f64>,
}

impl Decode for ExpertiseLevel {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let overall_level = r.required("overall_level");
            let domain_expertise = r.map_or_default_with("domain_expertise", unit_interval);
            Some(Self {
                overall_level: overall_level?,
                domain_expertise: domain_expertise?,
            })
        })
    }
}

/// A user's rating of one assistant response. All ratings are 1 to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct UserFeedback {
    #[schemars(range(min = 1, max = 5))]
    pub rating: i64,
    pub helpful: bool,
    #[schemars(range(min = 1, max = 5))]
    pub clarity_rating: i64,
    #[schemars(range(min = 1, max = 5))]
    pub accuracy_rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Decode for UserFeedback {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let rating_value = r.required_with("rating", rating);
            let helpful = r.required("helpful");
            let clarity_rating = r.required_with("clarity_rating", rating);
            let accuracy_rating = r.required_with("accuracy_rating", rating);
            let comments = r.optional("comments");
            Some(Self {
                rating: rating_value?,
                helpful: helpful?,
                clarity_rating: clarity_rating?,
                accuracy_rating: accuracy_rating?,
                comments: comments?,
            })
        })
    }
}

/// One question/answer exchange between a user and the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct LearningInteraction {
    pub id: String,
    /// Identifier of the owning [`User`].
    pub user_id: String,
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub query: String,
    pub response: String,
    /// Identifiers of the knowledge documents used to answer.
    #[serde(default)]
    pub context_used: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<UserFeedback>,
    pub timestamp: DateTime<Utc>,
    /// Seconds spent producing the response.
    #[schemars(range(min = 0.0))]
    pub processing_time: f64,
}

impl Decode for LearningInteraction {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let user_id = r.required("user_id");
            let interaction_type = r.required("type");
            let query = r.required("query");
            let response = r.required("response");
            let context_used = r.or_default("context_used");
            let feedback = r.optional("feedback");
            let timestamp = r.required("timestamp");
            let processing_time = r.required_with("processing_time", non_negative);
            Some(Self {
                id: id?,
                user_id: user_id?,
                interaction_type: interaction_type?,
                query: query?,
                response: response?,
                context_used: context_used?,
                feedback: feedback?,
                timestamp: timestamp?,
                processing_time: processing_time?,
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct LearningContext {
    /// Topic to the latest assessment of that topic.
    #[serde(default)]
    pub skill_levels: BTreeMap<String, SkillLevel>,
    /// Interactions in the order they happened.
    #[serde(default)]
    pub learning_history: Vec<LearningInteraction>,
    #[serde(default)]
    pub current_focus_areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_expertise: Option<ExpertiseLevel>,
}

impl Decode for LearningContext {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let skill_levels = r.or_default("skill_levels");
            let learning_history = r.or_default("learning_history");
            let current_focus_areas = r.or_default("current_focus_areas");
            let estimated_expertise = r.optional("estimated_expertise");
            Some(Self {
                skill_levels: skill_levels?,
                learning_history: learning_history?,
                current_focus_areas: current_focus_areas?,
                estimated_expertise: estimated_expertise?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub learning_context: LearningContext,
}

impl Decode for User {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let email = r.required("email");
            let username = r.required("username");
            let created_at = r.required("created_at");
            let updated_at = r.required("updated_at");
            let preferences = r.or_default("preferences");
            let learning_context = r.or_default("learning_context");
            Some(Self {
                id: id?,
                email: email?,
                username: username?,
                created_at: created_at?,
                updated_at: updated_at?,
                preferences: preferences?,
                learning_context: learning_context?,
            })
        })
    }
}

/// Sign-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct UserRegistration {
    pub email: String,
    pub username: String,
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl Decode for UserRegistration {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let email = r.required("email");
            let username = r.required("username");
            let password = r.required("password");
            let preferences = r.optional("preferences");
            Some(Self {
                email: email?,
                username: username?,
                password: password?,
                preferences: preferences?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl Decode for LoginCredentials {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let email = r.required("email");
            let password = r.required("password");
            Some(Self {
                email: email?,
                password: password?,
            })
        })
    }
}

crate::impl_record!(
    NotificationSettings,
    UserPreferences,
    SkillLevel,
    ExpertiseLevel,
    UserFeedback,
    LearningInteraction,
    LearningContext,
    User,
    UserRegistration,
    LoginCredentials,
);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Record;
    use serde_json::json;

    #[test]
    fn test_notification_settings_default_to_enabled() {
        let settings = NotificationSettings::from_json(&json!({"push_notifications": false})).unwrap();
        assert!(settings.email_notifications);
        assert!(!settings.push_notifications);
        assert!(settings.learning_reminders);
        assert!(settings.progress_updates);
    }

    #[test]
    fn test_preferences_defaults_are_fresh() {
        let mut a = UserPreferences::from_json(&json!({})).unwrap();
        let b = UserPreferences::from_json(&json!({})).unwrap();
        a.learning_goals.push("ownership".to_owned());
        assert!(b.learning_goals.is_empty());
        assert_eq!(b.explanation_style, ExplanationStyle::Detailed);
        assert_eq!(b.notification_settings, NotificationSettings::default());
    }

    #[test]
    fn test_feedback_rating_out_of_range() {
        let err = UserFeedback::from_json(&json!({
            "rating": 6,
            "helpful": true,
            "clarity_rating": 3,
            "accuracy_rating": 4
        }))
        .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.violations()[0].field, "rating");
        assert_eq!(err.violations()[0].value, Some(json!(6)));
    }

    #[test]
    fn test_expertise_scores_are_bounded() {
        let err = ExpertiseLevel::from_json(&json!({
            "overall_level": "intermediate",
            "domain_expertise": {"rust": 0.4, "sql": -0.2}
        }))
        .unwrap_err();
        assert_eq!(err.violations()[0].field, r#"domain_expertise["sql"]"#);
    }

    #[test]
    fn test_interaction_type_key_on_wire() {
        let interaction = LearningInteraction::from_json(&json!({
            "id": "int-1",
            "user_id": "u-1",
            "type": "code_analysis",
            "query": "what does this do?",
            "response": "it sorts",
            "timestamp": "2024-03-01T12:00:00Z",
            "processing_time": 1.25
        }))
        .unwrap();
        assert_eq!(interaction.interaction_type, InteractionType::CodeAnalysis);
        let json = interaction.to_json().unwrap();
        assert_eq!(json["type"], json!("code_analysis"));
        assert!(json.get("feedback").is_none());
    }

    #[test]
    fn test_negative_processing_time_rejected() {
        let err = LearningInteraction::from_json(&json!({
            "id": "int-1",
            "user_id": "u-1",
            "type": "debugging_help",
            "query": "q",
            "response": "r",
            "timestamp": "2024-03-01T12:00:00Z",
            "processing_time": -0.5
        }))
        .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.violations()[0].field, "processing_time");
    }

    #[test]
    fn test_registration_password_not_in_debug() {
        let registration = UserRegistration::from_json(&json!({
            "email": "ada@example.com",
            "username": "ada",
            "password": "correct horse battery staple"
        }))
        .unwrap();
        assert!(!format!("{registration:?}").contains("battery"));
        assert_eq!(
            registration.to_json().unwrap()["password"],
            json!("correct horse battery staple")
        );
    }
}
