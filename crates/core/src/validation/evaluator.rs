//! Rule evaluator — pure logic, runs bound rules over one record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ClientIdResolver, ClientScript};
use crate::error::CoreError;
use crate::i18n::I18n;
use crate::record::{is_empty_value, Record};

use super::either::{EitherRule, EitherRuleConfig};
use super::rules::{FieldRule, FieldViolation, ValidationOutcome, ValidationResult};

/// A rule together with the attributes it is applied to.
#[derive(Clone)]
pub struct BoundRule {
    pub attributes: Vec<String>,
    pub rule: Arc<dyn FieldRule>,
}

impl BoundRule {
    pub fn new(attributes: Vec<String>, rule: Arc<dyn FieldRule>) -> Result<Self, CoreError> {
        if attributes.is_empty() {
            return Err(CoreError::Configuration(format!(
                "Rule '{}' is not bound to any attribute",
                rule.name()
            )));
        }
        Ok(Self { attributes, rule })
    }
}

impl std::fmt::Debug for BoundRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundRule")
            .field("attributes", &self.attributes)
            .field("rule", &self.rule.name())
            .finish()
    }
}

/// Serializable declaration of an either rule and the attributes it guards.
///
/// ```json
/// { "attributes": ["email"], "otherAttributes": ["phone"], "message": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    pub attributes: Vec<String>,
    #[serde(flatten)]
    pub config: EitherRuleConfig,
}

impl RuleSpec {
    /// Build the rule and bind it to its attributes.
    pub fn bind(self) -> Result<BoundRule, CoreError> {
        let rule = EitherRule::from_config(self.config)?;
        BoundRule::new(self.attributes, Arc::new(rule))
    }
}

/// Bind every spec, stopping at the first configuration error.
pub fn bind_all(specs: Vec<RuleSpec>) -> Result<Vec<BoundRule>, CoreError> {
    specs.into_iter().map(RuleSpec::bind).collect()
}

/// Evaluate all rules against a single record.
///
/// Each rule runs once per bound attribute, in declaration order. Rules that
/// allow it are skipped for attributes that are empty. Failures are reported
/// into the record by the rules themselves and collected here.
pub fn validate_record(
    rules: &[BoundRule],
    record: &mut dyn Record,
    i18n: &I18n,
) -> ValidationResult {
    let mut errors = Vec::new();

    for bound in rules {
        for attribute in &bound.attributes {
            if bound.rule.skip_on_empty() && is_empty_value(record.get(attribute)) {
                continue;
            }
            if let ValidationOutcome::Fail(message) = bound.rule.validate(record, attribute, i18n) {
                errors.push(FieldViolation {
                    field: attribute.clone(),
                    rule_type: bound.rule.name().to_string(),
                    message,
                });
            }
        }
    }

    tracing::debug!(
        rule_count = rules.len(),
        error_count = errors.len(),
        "Record validated"
    );

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Render the client-side checks of all rules for a record.
pub fn client_scripts(
    rules: &[BoundRule],
    record: &dyn Record,
    ids: &dyn ClientIdResolver,
    i18n: &I18n,
) -> Result<Vec<ClientScript>, CoreError> {
    let mut scripts = Vec::new();
    for bound in rules {
        for attribute in &bound.attributes {
            if let Some(script) = bound.rule.client_script(record, attribute, ids, i18n)? {
                scripts.push(ClientScript {
                    field: attribute.clone(),
                    script,
                });
            }
        }
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FormInputIds;
    use crate::record::FormRecord;
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    /// Fails whenever the attribute is present; used to check skip handling.
    struct RejectFilled;

    impl FieldRule for RejectFilled {
        fn name(&self) -> &str {
            "reject_filled"
        }

        fn validate(
            &self,
            record: &mut dyn Record,
            field: &str,
            _i18n: &I18n,
        ) -> ValidationOutcome {
            record.report_error(field, "filled".to_string());
            ValidationOutcome::Fail("filled".to_string())
        }
    }

    fn data(pairs: &[(&str, Value)]) -> FormRecord {
        FormRecord::from_values(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn spec(value: Value) -> RuleSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn spec_parses_flattened_config() {
        let s = spec(json!({
            "attributes": ["email"],
            "otherAttributes": ["phone"],
            "message": "custom"
        }));
        assert_eq!(s.attributes, ["email"]);
        assert_eq!(s.config.other_attributes, ["phone"]);
        assert_eq!(s.config.message.as_deref(), Some("custom"));
    }

    #[test]
    fn spec_without_attributes_fails_to_bind() {
        let s = spec(json!({"attributes": [], "otherAttributes": ["phone"]}));
        assert_matches!(s.bind(), Err(CoreError::Configuration(_)));
    }

    #[test]
    fn spec_without_alternates_fails_to_bind() {
        let specs = vec![
            spec(json!({"attributes": ["email"], "otherAttributes": ["phone"]})),
            spec(json!({"attributes": ["name"], "otherAttributes": []})),
        ];
        assert_matches!(bind_all(specs), Err(CoreError::Configuration(_)));
    }

    #[test]
    fn collects_violations_per_attribute() {
        let rules = bind_all(vec![spec(json!({
            "attributes": ["email", "phone"],
            "otherAttributes": ["fax"]
        }))])
        .unwrap();
        let mut record = data(&[]);
        let result = validate_record(&rules, &mut record, &I18n::default());

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].field, "email");
        assert_eq!(result.errors[0].rule_type, "either");
        assert_eq!(result.errors[0].message, "Either 'Email', 'Fax' has to be filled");
        assert_eq!(result.errors[1].field, "phone");
        assert_eq!(record.errors().len(), 2);
    }

    #[test]
    fn valid_record_has_no_errors() {
        let rules = bind_all(vec![spec(json!({
            "attributes": ["email"],
            "otherAttributes": ["phone"]
        }))])
        .unwrap();
        let mut record = data(&[("phone", json!("555-1234"))]);
        let result = validate_record(&rules, &mut record, &I18n::default());

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(!record.has_errors());
    }

    #[test]
    fn skippable_rules_ignore_empty_attributes() {
        let rule = BoundRule::new(
            vec!["email".to_string(), "phone".to_string()],
            Arc::new(RejectFilled),
        )
        .unwrap();
        let mut record = data(&[("email", json!("")), ("phone", json!("x"))]);
        let result = validate_record(&[rule], &mut record, &I18n::default());

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "phone");
    }

    #[test]
    fn scripts_rendered_for_each_attribute() {
        let rules = bind_all(vec![spec(json!({
            "attributes": ["email", "phone"],
            "otherAttributes": ["fax"]
        }))])
        .unwrap();
        let record = FormRecord::new("Contact");
        let scripts = client_scripts(&rules, &record, &FormInputIds, &I18n::default()).unwrap();

        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0].field, "email");
        assert!(scripts[0].script.contains(r#""attribute":"contact-email""#));
        assert!(scripts[1].script.contains(r#""attribute":"contact-phone""#));
    }

    #[test]
    fn rules_without_script_render_nothing() {
        let rule = BoundRule::new(vec!["email".to_string()], Arc::new(RejectFilled)).unwrap();
        let scripts =
            client_scripts(&[rule], &FormRecord::default(), &FormInputIds, &I18n::default())
                .unwrap();
        assert!(scripts.is_empty());
    }
}
