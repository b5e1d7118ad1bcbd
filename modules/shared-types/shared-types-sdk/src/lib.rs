//! SmartLearn shared types.
//!
//! Record declarations exchanged between the API backend, the retrieval
//! pipeline and the personalization engine, together with the validation
//! that decides whether a JSON payload conforms to them.
//!
//! ```
//! use serde_json::json;
//! use shared_types_sdk::{Record, SkillLevel, TypeRegistry};
//!
//! let payload = json!({
//!     "topic": "recursion",
//!     "level": "advanced",
//!     "confidence": 0.85,
//!     "last_assessed": "2024-01-01T00:00:00Z"
//! });
//! let skill = SkillLevel::from_json(&payload).unwrap();
//! assert_eq!(skill.to_json().unwrap(), payload);
//!
//! let err = TypeRegistry::global()
//!     .validate("SkillLevel", &json!({"topic": "recursion", "level": "expert"}))
//!     .unwrap_err();
//! assert_eq!(err.validation_error().map(|e| e.len()), Some(3));
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod record;
pub mod registry;

pub(crate) use record::impl_record;

pub use config::ValidationConfig;
pub use error::{Constraint, RegistryError, ValidationError, Violation};
pub use models::*;
pub use record::Record;
pub use registry::{RecordType, TypeRegistry};
