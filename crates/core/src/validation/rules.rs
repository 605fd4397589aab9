//! Validation rule capability and result types.

use serde::{Deserialize, Serialize};

use crate::client::ClientIdResolver;
use crate::error::CoreError;
use crate::i18n::I18n;
use crate::record::Record;

/// A rule a validation host runs against one field of a record.
pub trait FieldRule: Send + Sync {
    /// Short identifier reported with violations.
    fn name(&self) -> &str;

    /// Check `field` on `record`, reporting a failure back into the record.
    fn validate(&self, record: &mut dyn Record, field: &str, i18n: &I18n) -> ValidationOutcome;

    /// Whether the host may skip this rule when `field` itself is empty.
    fn skip_on_empty(&self) -> bool {
        true
    }

    /// Script mirroring the check in the browser, if the rule has one.
    fn client_script(
        &self,
        _record: &dyn Record,
        _field: &str,
        _ids: &dyn ClientIdResolver,
        _i18n: &I18n,
    ) -> Result<Option<String>, CoreError> {
        Ok(None)
    }
}

/// Result of one rule evaluation against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Pass,
    Fail(String),
}

impl ValidationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The failure message, if the outcome is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message),
        }
    }
}

/// Aggregated result of evaluating all rules against one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
}
