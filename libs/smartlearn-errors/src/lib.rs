//! Core error types shared across SmartLearn services
//!
//! This crate provides pure data types for error handling, with no dependencies
//! on HTTP frameworks. It includes:
//! - RFC 9457 Problem Details (`Problem`)
//! - Field-level violations (`ValidationViolation`)
//! - Error catalog support (`ErrDef`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

// Re-export commonly used types
pub use catalog::ErrDef;
pub use problem::{Problem, ValidationViolation};
