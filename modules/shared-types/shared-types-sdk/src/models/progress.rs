//! Progress tracking and analytics events.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{Decode, DecodeContext, decode_object};

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SkillImprovement {
    pub topic: String,
    pub previous_level: f64,
    pub current_level: f64,
    pub improvement_date: DateTime<Utc>,
}

impl Decode for SkillImprovement {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let topic = r.required("topic");
            let previous_level = r.required("previous_level");
            let current_level = r.required("current_level");
            let improvement_date = r.required("improvement_date");
            Some(Self {
                topic: topic?,
                previous_level: previous_level?,
                current_level: current_level?,
                improvement_date: improvement_date?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ProgressMetrics {
    #[serde(default)]
    pub topics_covered: Vec<String>,
    /// Minutes.
    pub time_spent: u32,
    #[serde(default)]
    pub concepts_learned: i64,
    #[serde(default)]
    pub questions_asked: i64,
    #[serde(default)]
    pub feedback_given: i64,
    #[serde(default)]
    pub skill_improvements: Vec<SkillImprovement>,
}

impl Decode for ProgressMetrics {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let topics_covered = r.or_default("topics_covered");
            let time_spent = r.required("time_spent");
            let concepts_learned = r.or_default("concepts_learned");
            let questions_asked = r.or_default("questions_asked");
            let feedback_given = r.or_default("feedback_given");
            let skill_improvements = r.or_default("skill_improvements");
            Some(Self {
                topics_covered: topics_covered?,
                time_spent: time_spent?,
                concepts_learned: concepts_learned?,
                questions_asked: questions_asked?,
                feedback_given: feedback_given?,
                skill_improvements: skill_improvements?,
            })
        })
    }
}

/// One analytics event. `event_data` is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AnalyticsData {
    pub user_id: String,
    pub session_id: String,
    pub event_type: String,
    #[serde(default)]
    pub event_data: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl Decode for AnalyticsData {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let user_id = r.required("user_id");
            let session_id = r.required("session_id");
            let event_type = r.required("event_type");
            let event_data = r.or_default("event_data");
            let timestamp = r.required("timestamp");
            Some(Self {
                user_id: user_id?,
                session_id: session_id?,
                event_type: event_type?,
                event_data: event_data?,
                timestamp: timestamp?,
            })
        })
    }
}

crate::impl_record!(SkillImprovement, ProgressMetrics, AnalyticsData);
