//! Public error types for the shared types SDK.
//!
//! Validation never stops at the first bad field: a [`ValidationError`] holds
//! one [`Violation`] per offending field so callers can report everything in a
//! single response.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use smartlearn_errors::{Problem, ValidationViolation, catalog};
use thiserror::Error;

/// The rule a field broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// A required field is missing.
    Required,
    /// The value has the wrong JSON type (or an unparseable datetime).
    Type { expected: &'static str },
    /// A number lies outside its inclusive bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// A string is not one of the enum's literals.
    Enum { allowed: &'static [&'static str] },
    /// The object carries a key the record does not declare.
    UnknownField,
    /// The record could not be encoded as JSON.
    Encoding,
}

impl Constraint {
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self::Range {
            min: Some(min),
            max: None,
        }
    }

    #[must_use]
    pub const fn expected(kind: &'static str) -> Self {
        Self::Type { expected: kind }
    }

    /// Machine-readable constraint code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type { .. } => "type",
            Self::Range { .. } => "range",
            Self::Enum { .. } => "enum",
            Self::UnknownField => "unknown_field",
            Self::Encoding => "encoding",
        }
    }

    fn describe(&self, value: Option<&Value>) -> String {
        match self {
            Self::Required => "field required".to_owned(),
            Self::Type { expected } => {
                format!("expected {expected}, got {}", json_kind(value))
            }
            Self::Range {
                min: Some(min),
                max: Some(max),
            } => format!("must be between {min} and {max}"),
            Self::Range {
                min: Some(min),
                max: None,
            } => format!("must be greater than or equal to {min}"),
            Self::Range {
                min: None,
                max: Some(max),
            } => format!("must be less than or equal to {max}"),
            Self::Range {
                min: None,
                max: None,
            } => "out of range".to_owned(),
            Self::Enum { allowed } => {
                let quoted: Vec<String> = allowed.iter().map(|a| format!("'{a}'")).collect();
                format!("expected one of {}", quoted.join(", "))
            }
            Self::UnknownField => "unknown field".to_owned(),
            Self::Encoding => "value could not be encoded as JSON".to_owned(),
        }
    }
}

fn json_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(n)) if n.is_f64() => "float",
        Some(Value::Number(_)) => "integer",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// One offending field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Path to the field, e.g. `learning_history[0].feedback.rating`.
    pub field: String,
    /// The value that was received; `None` when the field was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub constraint: Constraint,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: impl Into<String>, value: Option<Value>, constraint: Constraint) -> Self {
        let message = constraint.describe(value.as_ref());
        Self {
            field: field.into(),
            value,
            constraint,
            message,
        }
    }

    /// Converts into the client-facing wire shape.
    #[must_use]
    pub fn to_wire(&self) -> ValidationViolation {
        let wire = ValidationViolation::new(&self.field, &self.message)
            .with_code(self.constraint.code());
        match &self.value {
            Some(value) => wire.with_value(value.clone()),
            None => wire,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A payload failed validation against a record schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    record: &'static str,
    violations: Vec<Violation>,
}

impl ValidationError {
    #[must_use]
    pub fn new(record: &'static str, violations: Vec<Violation>) -> Self {
        Self { record, violations }
    }

    /// Name of the record type that was being validated.
    #[must_use]
    pub const fn record(&self) -> &'static str {
        self.record
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation reported for `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// 422 problem carrying one wire violation per offending field.
    pub fn to_problem(&self) -> Problem {
        catalog::VALIDATION_FAILED
            .as_problem(self.to_string())
            .with_errors(self.violations.iter().map(Violation::to_wire).collect())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.violations.len() == 1 {
            "error"
        } else {
            "errors"
        };
        write!(
            f,
            "{} validation {noun} for {}",
            self.violations.len(),
            self.record
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

impl From<ValidationError> for Problem {
    fn from(err: ValidationError) -> Self {
        err.to_problem()
    }
}

/// Errors returned by [`TypeRegistry`](crate::TypeRegistry).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// No record type is registered under this name.
    #[error("Unknown record type: {0}")]
    UnknownType(String),

    /// The payload did not conform to the record schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A validated record could not be re-encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl RegistryError {
    /// Creates an `UnknownType` error.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    /// Creates a `Serialization` error.
    #[must_use]
    pub fn serialization(err: impl fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Returns `true` if this is an unknown type error.
    #[must_use]
    pub const fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType(_))
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the validation error, if this is one.
    #[must_use]
    pub const fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for Problem {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownType(name) => catalog::UNKNOWN_TYPE
                .as_problem(format!("No record type named '{name}' is registered")),
            RegistryError::Validation(err) => err.to_problem(),
            RegistryError::Serialization(msg) => catalog::SERIALIZATION_FAILED.as_problem(msg),
        }
    }
}
