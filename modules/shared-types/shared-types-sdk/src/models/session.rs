//! Conversation state the assistant carries between turns.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

use super::user::{SkillLevel, UserPreferences};
use crate::decode::{Decode, DecodeContext, decode_object};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ConversationMessage {
    /// Speaker, `"user"` or `"assistant"` by convention.
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Decode for ConversationMessage {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let role = r.required("role");
            let content = r.required("content");
            let timestamp = r.required("timestamp");
            let metadata = r.optional("metadata");
            Some(Self {
                role: role?,
                content: content?,
                timestamp: timestamp?,
                metadata: metadata?,
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SessionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_topic: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationMessage>,
    #[serde(default)]
    pub active_learning_goals: Vec<String>,
}

impl Decode for SessionContext {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let current_topic = r.optional("current_topic");
            let conversation_history = r.or_default("conversation_history");
            let active_learning_goals = r.or_default("active_learning_goals");
            Some(Self {
                current_topic: current_topic?,
                conversation_history: conversation_history?,
                active_learning_goals: active_learning_goals?,
            })
        })
    }
}

/// Everything the personalization step needs to know about the asker.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct UserContext {
    pub user_id: String,
    pub skill_level: SkillLevel,
    pub preferences: UserPreferences,
    #[serde(default)]
    pub session_context: SessionContext,
}

impl Decode for UserContext {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let user_id = r.required("user_id");
            let skill_level = r.required("skill_level");
            let preferences = r.required("preferences");
            let session_context = r.or_default("session_context");
            Some(Self {
                user_id: user_id?,
                skill_level: skill_level?,
                preferences: preferences?,
                session_context: session_context?,
            })
        })
    }
}

crate::impl_record!(ConversationMessage, SessionContext, UserContext);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Record;
    use serde_json::json;

    #[test]
    fn test_message_metadata_is_free_form() {
        let message = ConversationMessage::from_json(&json!({
            "role": "assistant",
            "content": "Here is an example.",
            "timestamp": "2024-05-05T10:00:00Z",
            "metadata": {"tokens": 42, "sources": ["doc-1"], "cached": null}
        }))
        .unwrap();
        let metadata = message.metadata.unwrap();
        assert_eq!(metadata["tokens"], json!(42));
        assert_eq!(metadata["cached"], Value::Null);
    }

    #[test]
    fn test_message_metadata_must_be_object() {
        let err = ConversationMessage::from_json(&json!({
            "role": "user",
            "content": "hi",
            "timestamp": "2024-05-05T10:00:00Z",
            "metadata": [1, 2]
        }))
        .unwrap_err();
        assert_eq!(err.violations()[0].field, "metadata");
    }

    #[test]
    fn test_user_context_nested_violations() {
        let err = UserContext::from_json(&json!({
            "user_id": "u-1",
            "skill_level": {
                "topic": "closures",
                "level": "expert",
                "confidence": 0.5,
                "last_assessed": "2024-01-01T00:00:00Z"
            },
            "preferences": {"explanation_style": "verbose"},
            "session_context": {
                "conversation_history": [{"role": "user", "content": "hi"}]
            }
        }))
        .unwrap_err();

        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "skill_level.level",
                "preferences.explanation_style",
                "session_context.conversation_history[0].timestamp",
            ]
        );
    }
}
