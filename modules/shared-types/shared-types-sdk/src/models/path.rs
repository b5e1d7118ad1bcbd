//! Personalized learning paths.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::enums::DifficultyLevel;
use crate::decode::{Decode, DecodeContext, decode_object};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LearningResource {
    pub id: String,
    pub title: String,
    /// `"article"`, `"video"`, `"exercise"` or `"project"` by convention.
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub difficulty_level: DifficultyLevel,
    /// Minutes.
    pub estimated_time: u32,
}

impl Decode for LearningResource {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let title = r.required("title");
            let resource_type = r.required("type");
            let url = r.optional("url");
            let content = r.optional("content");
            let difficulty_level = r.required("difficulty_level");
            let estimated_time = r.required("estimated_time");
            Some(Self {
                id: id?,
                title: title?,
                resource_type: resource_type?,
                url: url?,
                content: content?,
                difficulty_level: difficulty_level?,
                estimated_time: estimated_time?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub completion_criteria: Vec<String>,
    /// Hours.
    pub estimated_time: u32,
}

impl Decode for Milestone {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let title = r.required("title");
            let description = r.required("description");
            let required_skills = r.or_default("required_skills");
            let completion_criteria = r.or_default("completion_criteria");
            let estimated_time = r.required("estimated_time");
            Some(Self {
                id: id?,
                title: title?,
                description: description?,
                required_skills: required_skills?,
                completion_criteria: completion_criteria?,
                estimated_time: estimated_time?,
            })
        })
    }
}

/// An ordered plan of milestones and resources for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LearningPath {
    pub id: String,
    /// Identifier of the owning user.
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub target_skills: Vec<String>,
    /// Hours.
    pub estimated_duration: u32,
    #[serde(default)]
    pub difficulty_progression: Vec<DifficultyLevel>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

impl Decode for LearningPath {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let user_id = r.required("user_id");
            let title = r.required("title");
            let description = r.required("description");
            let target_skills = r.or_default("target_skills");
            let estimated_duration = r.required("estimated_duration");
            let difficulty_progression = r.or_default("difficulty_progression");
            let milestones = r.or_default("milestones");
            let resources = r.or_default("resources");
            Some(Self {
                id: id?,
                user_id: user_id?,
                title: title?,
                description: description?,
                target_skills: target_skills?,
                estimated_duration: estimated_duration?,
                difficulty_progression: difficulty_progression?,
                milestones: milestones?,
                resources: resources?,
            })
        })
    }
}

crate::impl_record!(LearningResource, Milestone, LearningPath);
