//! Closed vocabularies shared by the records.
//!
//! Every enum serializes as its literal. Parsing is exact and case-sensitive:
//! `"Advanced"` is not `"advanced"`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::decode::{Decode, DecodeContext};
use crate::error::Constraint;

/// A string is not one of an enum's literals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant '{value}', expected one of {allowed:?}")]
pub struct UnknownVariant {
    pub value: String,
    pub allowed: &'static [&'static str],
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every wire literal, in declaration order.
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        value: s.to_owned(),
                        allowed: Self::LITERALS,
                    }),
                }
            }
        }

        impl Decode for $name {
            fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
                let Some(s) = value.as_str() else {
                    cx.report(Some(value), Constraint::expected("string"));
                    return None;
                };
                if let Ok(parsed) = s.parse() {
                    Some(parsed)
                } else {
                    cx.report(Some(value), Constraint::Enum { allowed: Self::LITERALS });
                    None
                }
            }
        }
    };
}

string_enum! {
    /// How hard a concept, document or resource is.
    pub enum DifficultyLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    pub enum ExplanationDepth {
        Basic => "basic",
        Detailed => "detailed",
        Comprehensive => "comprehensive",
    }
}

string_enum! {
    /// Preferred shape of generated explanations.
    pub enum ExplanationStyle {
        Detailed => "detailed",
        Concise => "concise",
        ExampleHeavy => "example-heavy",
    }
}

impl Default for ExplanationStyle {
    fn default() -> Self {
        Self::Detailed
    }
}

string_enum! {
    /// What the user asked the assistant to do.
    pub enum InteractionType {
        ConceptExplanation => "concept_explanation",
        CodeAnalysis => "code_analysis",
        DebuggingHelp => "debugging_help",
    }
}

string_enum! {
    pub enum DocumentType {
        Tutorial => "tutorial",
        Documentation => "documentation",
        Example => "example",
        Reference => "reference",
    }
}

string_enum! {
    /// Kind of problem found in analyzed code.
    pub enum IssueType {
        Error => "error",
        Warning => "warning",
        Suggestion => "suggestion",
    }
}

string_enum! {
    pub enum IssueSeverity {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use serde_json::json;

    #[test]
    fn test_literals_round_trip() {
        for level in DifficultyLevel::ALL {
            assert_eq!(level.as_str().parse::<DifficultyLevel>(), Ok(*level));
        }
        assert_eq!(ExplanationStyle::ExampleHeavy.as_str(), "example-heavy");
        assert_eq!(
            InteractionType::DebuggingHelp.to_string(),
            "debugging_help"
        );
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        let err = "Advanced".parse::<DifficultyLevel>().unwrap_err();
        assert_eq!(err.value, "Advanced");
        assert_eq!(err.allowed, DifficultyLevel::LITERALS);
        assert!("expert".parse::<DifficultyLevel>().is_err());
        assert!("example_heavy".parse::<ExplanationStyle>().is_err());
    }

    #[test]
    fn test_serde_uses_literals() {
        assert_eq!(
            serde_json::to_value(ExplanationStyle::ExampleHeavy).unwrap(),
            json!("example-heavy")
        );
        let severity: IssueSeverity = serde_json::from_value(json!("high")).unwrap();
        assert_eq!(severity, IssueSeverity::High);
        assert!(serde_json::from_value::<IssueSeverity>(json!("HIGH")).is_err());
    }

    #[test]
    fn test_decode_reports_enum_constraint() {
        let mut cx = DecodeContext::new(ValidationConfig::default());
        let out = DocumentType::decode(&json!("blog"), &mut cx);
        let err = cx.finish("DocumentType", out).unwrap_err();
        assert_eq!(
            err.violations()[0].constraint,
            Constraint::Enum {
                allowed: &["tutorial", "documentation", "example", "reference"]
            }
        );
        assert_eq!(err.violations()[0].value, Some(json!("blog")));
    }

    #[test]
    fn test_decode_rejects_non_strings() {
        let mut cx = DecodeContext::new(ValidationConfig::default());
        let out = IssueType::decode(&json!(1), &mut cx);
        let err = cx.finish("IssueType", out).unwrap_err();
        assert_eq!(err.violations()[0].constraint, Constraint::expected("string"));
    }

    #[test]
    fn test_default_style() {
        assert_eq!(ExplanationStyle::default(), ExplanationStyle::Detailed);
    }
}
