//! Static error definitions shared by SmartLearn services

use crate::problem::Problem;
use http::StatusCode;

/// Static error definition from catalog
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        // Convert u16 to StatusCode, using INTERNAL_SERVER_ERROR as fallback for invalid codes
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }
}

/// A payload did not conform to its record schema.
pub const VALIDATION_FAILED: ErrDef = ErrDef {
    status: 422,
    title: "Validation Failed",
    code: "VALIDATION_ERROR",
    type_url: "urn:smartlearn:problem:validation-error",
};

/// A payload named a record type nobody registered.
pub const UNKNOWN_TYPE: ErrDef = ErrDef {
    status: 404,
    title: "Unknown Type",
    code: "UNKNOWN_TYPE",
    type_url: "urn:smartlearn:problem:unknown-type",
};

/// A validated record could not be re-encoded.
pub const SERIALIZATION_FAILED: ErrDef = ErrDef {
    status: 500,
    title: "Serialization Failed",
    code: "SERIALIZATION_ERROR",
    type_url: "urn:smartlearn:problem:serialization-error",
};
