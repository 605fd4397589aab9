//! The either-or rule: at least one of several fields has to be filled.
//!
//! Configured against a primary field with a list of alternates. A record
//! passes when the primary field or any alternate holds a non-empty value.
//! On failure the rule reports one message against the primary field.

use serde::{Deserialize, Serialize};

use crate::client::{script_json, ClientIdResolver};
use crate::error::CoreError;
use crate::i18n::I18n;
use crate::record::{is_empty_value, Record};

use super::rules::{FieldRule, ValidationOutcome};

/// Identifier reported with violations of this rule.
pub const RULE_TYPE: &str = "either";

/// Message used when the configuration does not supply one.
///
/// `{attribute}` is the primary field's label, `{other_attributes}` the
/// alternates' labels joined with `", "`.
pub const DEFAULT_MESSAGE: &str = "Either '{attribute}', '{other_attributes}' has to be filled";

/// Configuration surface exposed to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EitherRuleConfig {
    pub other_attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Requires the validated field or one of `other_attributes` to be filled.
///
/// Immutable once built; one instance can serve any number of records.
#[derive(Debug, Clone)]
pub struct EitherRule {
    other_attributes: Vec<String>,
    message: String,
}

impl EitherRule {
    /// Build a rule from its alternates and an optional message template.
    ///
    /// Fails when no alternates are given or one of them is blank.
    pub fn new<I, S>(other_attributes: I, message: Option<String>) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let other_attributes: Vec<String> = other_attributes.into_iter().map(Into::into).collect();

        if other_attributes.is_empty() {
            tracing::warn!(rule = RULE_TYPE, "Rule configured without other attributes");
            return Err(CoreError::Configuration(
                "Other attributes are not set".to_string(),
            ));
        }
        if other_attributes.iter().any(|a| a.trim().is_empty()) {
            tracing::warn!(rule = RULE_TYPE, "Rule configured with a blank attribute name");
            return Err(CoreError::Configuration(
                "Other attributes must not contain blank names".to_string(),
            ));
        }

        Ok(Self {
            other_attributes,
            message: message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        })
    }

    pub fn from_config(config: EitherRuleConfig) -> Result<Self, CoreError> {
        Self::new(config.other_attributes, config.message)
    }

    pub fn other_attributes(&self) -> &[String] {
        &self.other_attributes
    }

    /// The unformatted message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the rule without touching the record.
    pub fn check(&self, record: &dyn Record, field: &str, i18n: &I18n) -> ValidationOutcome {
        let all_empty = std::iter::once(field)
            .chain(self.other_attributes.iter().map(String::as_str))
            .all(|name| is_empty_value(record.get(name)));

        if all_empty {
            ValidationOutcome::Fail(self.error_message(record, field, i18n))
        } else {
            ValidationOutcome::Pass
        }
    }

    /// The failure message for `field`, formatted with the record's labels.
    pub fn error_message(&self, record: &dyn Record, field: &str, i18n: &I18n) -> String {
        let attribute = record.label(field);
        let other_attributes = self
            .other_attributes
            .iter()
            .map(|name| record.label(name))
            .collect::<Vec<_>>()
            .join(", ");

        i18n.format(
            &self.message,
            &[
                ("attribute", attribute.as_str()),
                ("other_attributes", other_attributes.as_str()),
            ],
        )
    }

    /// Render a browser-side fragment performing the same check.
    ///
    /// The fragment reads each input's value by element id and pushes the
    /// pre-formatted message onto the page's `messages` array when every
    /// input is empty. Missing elements count as empty.
    pub fn render_client_check(
        &self,
        record: &dyn Record,
        field: &str,
        ids: &dyn ClientIdResolver,
        i18n: &I18n,
    ) -> Result<String, CoreError> {
        let options = ClientOptions {
            attribute: ids.input_id_for(record, field),
            other_attributes: self
                .other_attributes
                .iter()
                .map(|name| ids.input_id_for(record, name))
                .collect(),
            message: self.error_message(record, field, i18n),
        };
        let options_json = script_json(&options)?;

        Ok(format!(
            r#"(function(){{
    var options = {options_json};
    var values = [];
    values.push($('#' + options.attribute).val());
    for (var i = 0; i < options.otherAttributes.length; i++) {{
        values.push($('#' + options.otherAttributes[i]).val());
    }}
    if (values.filter(function(e){{
            return e !== undefined && e !== null && String(e).length > 0;
        }}).length == 0) {{
        messages.push(options.message);
    }}
}})();"#
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientOptions {
    attribute: String,
    other_attributes: Vec<String>,
    message: String,
}

impl FieldRule for EitherRule {
    fn name(&self) -> &str {
        RULE_TYPE
    }

    fn validate(&self, record: &mut dyn Record, field: &str, i18n: &I18n) -> ValidationOutcome {
        let outcome = self.check(&*record, field, i18n);
        if let ValidationOutcome::Fail(message) = &outcome {
            tracing::debug!(
                field,
                other_attributes = ?self.other_attributes,
                "No field of the either group is filled"
            );
            record.report_error(field, message.clone());
        }
        outcome
    }

    /// The rule exists to catch an empty primary field, so it never skips.
    fn skip_on_empty(&self) -> bool {
        false
    }

    fn client_script(
        &self,
        record: &dyn Record,
        field: &str,
        ids: &dyn ClientIdResolver,
        i18n: &I18n,
    ) -> Result<Option<String>, CoreError> {
        self.render_client_check(record, field, ids, i18n).map(Some)
    }
}
