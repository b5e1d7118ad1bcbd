//! The [`Record`] trait every shared type implements.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::config::ValidationConfig;
use crate::decode::{Decode, DecodeContext};
use crate::error::{Constraint, ValidationError, Violation};

/// A named, validated data record.
pub trait Record: Decode + Serialize + JsonSchema {
    /// Name the record is registered under.
    const NAME: &'static str;

    /// Decodes and validates `value` with the default configuration.
    ///
    /// # Errors
    /// Returns every violation found in `value`.
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        Self::from_json_with(value, ValidationConfig::default())
    }

    /// Decodes and validates `value` with an explicit configuration.
    ///
    /// # Errors
    /// Returns every violation found in `value`.
    fn from_json_with(value: &Value, config: ValidationConfig) -> Result<Self, ValidationError> {
        let mut cx = DecodeContext::new(config);
        let out = Self::decode(value, &mut cx);
        let result = cx.finish(Self::NAME, out);
        if let Err(err) = &result {
            tracing::trace!(record = Self::NAME, violations = err.len(), "record rejected");
        }
        result
    }

    /// Canonical wire object.
    ///
    /// # Errors
    /// Returns an `encoding` violation when the record cannot be represented
    /// as JSON.
    fn to_json(&self) -> Result<Value, ValidationError> {
        serde_json::to_value(self).map_err(|e| {
            tracing::debug!(record = Self::NAME, error = %e, "record encoding failed");
            ValidationError::new(
                Self::NAME,
                vec![Violation::new("$", None, Constraint::Encoding)],
            )
        })
    }

    /// Re-checks an instance built in-process, where constructors bypass
    /// the decoder.
    ///
    /// # Errors
    /// Returns every violation the encoded instance would fail with.
    fn validate(&self) -> Result<(), ValidationError> {
        let json = self.to_json()?;
        Self::from_json(&json).map(drop)
    }
}

/// Implements [`Record`] and a validating `serde::Deserialize` for each type.
///
/// The record name is the type name. Deserialization buffers the input into a
/// [`Value`] and runs the collect-all decoder, so a failing payload reports
/// every violation in the serde error message.
macro_rules! impl_record {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Record for $ty {
                const NAME: &'static str = stringify!($ty);
            }

            impl<'de> ::serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                    <Self as $crate::Record>::from_json(&value).map_err(::serde::de::Error::custom)
                }
            }
        )+
    };
}

pub(crate) use impl_record;
