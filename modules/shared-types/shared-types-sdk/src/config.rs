//! Validation configuration.

use serde::Deserialize;

/// Knobs for record validation.
///
/// Embeddable in a host service's config file:
///
/// ```yaml
/// shared_types:
///   deny_unknown_fields: true
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ValidationConfig {
    /// Report keys a record does not declare as violations.
    /// Default: `false` (extra keys are ignored).
    pub deny_unknown_fields: bool,
}

impl ValidationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict mode: every undeclared key becomes an `unknown_field` violation.
    #[must_use]
    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}
