//! Skill assessment and personalization outputs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::user::SkillLevel;
use crate::decode::{Decode, DecodeContext, decode_object, unit_interval};

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SkillAssessment {
    pub user_id: String,
    pub assessed_skills: BTreeMap<String, SkillLevel>,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence_score: f64,
    pub assessment_date: DateTime<Utc>,
    pub assessment_method: String,
}

impl Decode for SkillAssessment {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let user_id = r.required("user_id");
            let assessed_skills = r.required("assessed_skills");
            let confidence_score = r.required_with("confidence_score", unit_interval);
            let assessment_date = r.required("assessment_date");
            let assessment_method = r.required("assessment_method");
            Some(Self {
                user_id: user_id?,
                assessed_skills: assessed_skills?,
                confidence_score: confidence_score?,
                assessment_date: assessment_date?,
                assessment_method: assessment_method?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PersonalizedResponse {
    pub original_response: String,
    pub personalized_content: String,
    pub adaptation_factors: Vec<String>,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence_score: f64,
}

impl Decode for PersonalizedResponse {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let original_response = r.required("original_response");
            let personalized_content = r.required("personalized_content");
            let adaptation_factors = r.required("adaptation_factors");
            let confidence_score = r.required_with("confidence_score", unit_interval);
            Some(Self {
                original_response: original_response?,
                personalized_content: personalized_content?,
                adaptation_factors: adaptation_factors?,
                confidence_score: confidence_score?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct WorkflowOptimization {
    pub current_workflow: String,
    pub optimized_workflow: String,
    pub improvements: Vec<String>,
    /// Minutes.
    pub estimated_time_savings: u32,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub difficulty_reduction: f64,
}

impl Decode for WorkflowOptimization {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let current_workflow = r.required("current_workflow");
            let optimized_workflow = r.required("optimized_workflow");
            let improvements = r.required("improvements");
            let estimated_time_savings = r.required("estimated_time_savings");
            let difficulty_reduction = r.required_with("difficulty_reduction", unit_interval);
            Some(Self {
                current_workflow: current_workflow?,
                optimized_workflow: optimized_workflow?,
                improvements: improvements?,
                estimated_time_savings: estimated_time_savings?,
                difficulty_reduction: difficulty_reduction?,
            })
        })
    }
}

crate::impl_record!(SkillAssessment, PersonalizedResponse, WorkflowOptimization);
