//! Response envelopes shared by every HTTP-facing service.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};
use smartlearn_utils::SecretString;

use super::user::User;
use crate::decode::{Decode, DecodeContext, decode_object};

/// Wire shape of one field-level validation failure.
pub use smartlearn_errors::ValidationViolation;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Seconds until `access_token` expires.
    pub expires_in: u64,
}

impl Decode for AuthResponse {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let user = r.required("user");
            let access_token = r.required("access_token");
            let refresh_token = r.required("refresh_token");
            let expires_in = r.required("expires_in");
            Some(Self {
                user: user?,
                access_token: access_token?,
                refresh_token: refresh_token?,
                expires_in: expires_in?,
            })
        })
    }
}

/// Generic success/failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ApiResponse {
    pub success: bool,
    /// Payload. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Decode for ApiResponse {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let success = r.required("success");
            let data = r.optional_json("data");
            let error = r.optional("error");
            let message = r.optional("message");
            Some(Self {
                success: success?,
                data: data?,
                error: error?,
                message: message?,
            })
        })
    }
}

/// One page of results. `has_next`/`has_prev` are taken as given and are not
/// cross-checked against `total`, `page` and `limit`.
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PaginatedResponse {
    pub data: Vec<Value>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Decode for PaginatedResponse {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let data = r.required("data");
            let total = r.required("total");
            let page = r.required("page");
            let limit = r.required("limit");
            let has_next = r.required("has_next");
            let has_prev = r.required("has_prev");
            Some(Self {
                data: data?,
                total: total?,
                page: page?,
                limit: limit?,
                has_next: has_next?,
                has_prev: has_prev?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ApiError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }
}

impl Decode for ApiError {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let code = r.required("code");
            let message = r.required("message");
            let details = r.optional("details");
            Some(Self {
                code: code?,
                message: message?,
                details: details?,
            })
        })
    }
}

crate::impl_record!(AuthResponse, ApiResponse, PaginatedResponse, ApiError);
