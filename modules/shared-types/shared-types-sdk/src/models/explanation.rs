//! Output artifacts of the explanation generator.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::enums::{DifficultyLevel, IssueSeverity, IssueType};
use crate::decode::{Decode, DecodeContext, decode_object};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Example {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub use_case: String,
}

impl Decode for Example {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let title = r.required("title");
            let description = r.required("description");
            let code_snippet = r.optional("code_snippet");
            let language = r.optional("language");
            let use_case = r.required("use_case");
            Some(Self {
                title: title?,
                description: description?,
                code_snippet: code_snippet?,
                language: language?,
                use_case: use_case?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Analogy {
    pub concept: String,
    pub analogy: String,
    pub explanation: String,
}

impl Decode for Analogy {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let concept = r.required("concept");
            let analogy = r.required("analogy");
            let explanation = r.required("explanation");
            Some(Self {
                concept: concept?,
                analogy: analogy?,
                explanation: explanation?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct StepByStep {
    pub step_number: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
}

impl Decode for StepByStep {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let step_number = r.required("step_number");
            let title = r.required("title");
            let description = r.required("description");
            let code_example = r.optional("code_example");
            Some(Self {
                step_number: step_number?,
                title: title?,
                description: description?,
                code_example: code_example?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ConceptExplanation {
    pub id: String,
    pub concept: String,
    pub content: String,
    pub difficulty_level: DifficultyLevel,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub analogies: Vec<Analogy>,
    #[serde(default)]
    pub step_by_step: Vec<StepByStep>,
    #[serde(default)]
    pub related_concepts: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Decode for ConceptExplanation {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let concept = r.required("concept");
            let content = r.required("content");
            let difficulty_level = r.required("difficulty_level");
            let examples = r.or_default("examples");
            let analogies = r.or_default("analogies");
            let step_by_step = r.or_default("step_by_step");
            let related_concepts = r.or_default("related_concepts");
            let sources = r.or_default("sources");
            Some(Self {
                id: id?,
                concept: concept?,
                content: content?,
                difficulty_level: difficulty_level?,
                examples: examples?,
                analogies: analogies?,
                step_by_step: step_by_step?,
                related_concepts: related_concepts?,
                sources: sources?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LineExplanation {
    pub line_number: i64,
    pub code: String,
    pub explanation: String,
    #[serde(default)]
    pub concepts: Vec<String>,
}

impl Decode for LineExplanation {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let line_number = r.required("line_number");
            let code = r.required("code");
            let explanation = r.required("explanation");
            let concepts = r.or_default("concepts");
            Some(Self {
                line_number: line_number?,
                code: code?,
                explanation: explanation?,
                concepts: concepts?,
            })
        })
    }
}

/// A problem spotted in a code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<i64>,
    pub description: String,
    pub solution: String,
    pub severity: IssueSeverity,
}

impl Decode for Issue {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let issue_type = r.required("type");
            let line_number = r.optional("line_number");
            let description = r.required("description");
            let solution = r.required("solution");
            let severity = r.required("severity");
            Some(Self {
                issue_type: issue_type?,
                line_number: line_number?,
                description: description?,
                solution: solution?,
                severity: severity?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CodeExplanation {
    pub id: String,
    pub code_snippet: String,
    pub language: String,
    #[serde(default)]
    pub line_explanations: Vec<LineExplanation>,
    pub overall_summary: String,
    #[serde(default)]
    pub best_practices: Vec<String>,
    #[serde(default)]
    pub potential_issues: Vec<Issue>,
    #[serde(default)]
    pub optimization_suggestions: Vec<String>,
}

impl Decode for CodeExplanation {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let code_snippet = r.required("code_snippet");
            let language = r.required("language");
            let line_explanations = r.or_default("line_explanations");
            let overall_summary = r.required("overall_summary");
            let best_practices = r.or_default("best_practices");
            let potential_issues = r.or_default("potential_issues");
            let optimization_suggestions = r.or_default("optimization_suggestions");
            Some(Self {
                id: id?,
                code_snippet: code_snippet?,
                language: language?,
                line_explanations: line_explanations?,
                overall_summary: overall_summary?,
                best_practices: best_practices?,
                potential_issues: potential_issues?,
                optimization_suggestions: optimization_suggestions?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Fix {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_change: Option<String>,
    pub explanation: String,
}

impl Decode for Fix {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let description = r.required("description");
            let code_change = r.optional("code_change");
            let explanation = r.required("explanation");
            Some(Self {
                description: description?,
                code_change: code_change?,
                explanation: explanation?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DebuggingSuggestion {
    /// Free-form category, e.g. `"NullPointerException"`.
    pub issue_type: String,
    pub description: String,
    #[serde(default)]
    pub suggested_fixes: Vec<Fix>,
    #[serde(default)]
    pub debugging_steps: Vec<String>,
    #[serde(default)]
    pub related_resources: Vec<String>,
}

impl Decode for DebuggingSuggestion {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let issue_type = r.required("issue_type");
            let description = r.required("description");
            let suggested_fixes = r.or_default("suggested_fixes");
            let debugging_steps = r.or_default("debugging_steps");
            let related_resources = r.or_default("related_resources");
            Some(Self {
                issue_type: issue_type?,
                description: description?,
                suggested_fixes: suggested_fixes?,
                debugging_steps: debugging_steps?,
                related_resources: related_resources?,
            })
        })
    }
}

crate::impl_record!(
    Example,
    Analogy,
    StepByStep,
    ConceptExplanation,
    LineExplanation,
    Issue,
    CodeExplanation,
    Fix,
    DebuggingSuggestion,
);
