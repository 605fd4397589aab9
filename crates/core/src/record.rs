//! The record capability rules validate against, plus an in-memory record.
//!
//! A record is owned by the host: rules only read named values from it, ask
//! it for display labels, and report errors back into it.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::types::FieldValue;

/// One form submission or domain object being validated.
pub trait Record {
    /// Current value of `field`, or `None` when the record has no such field.
    fn get(&self, field: &str) -> Option<&FieldValue>;

    /// Human-readable label for `field`.
    fn label(&self, field: &str) -> String {
        generate_label(field)
    }

    /// Register a validation error against `field`.
    fn report_error(&mut self, field: &str, message: String);

    /// Name of the form this record is rendered in. Used to derive input ids.
    fn form_name(&self) -> &str {
        ""
    }
}

/// Whether a field value counts as empty.
///
/// Absent and `null` values are empty. Other values are empty when their text
/// form has no characters: `""`, `false`, and empty objects. Numbers always
/// have a text form and are never empty.
///
/// Arrays use the comma-joined text of their elements, the form a browser
/// gives a multi-select value: `[]` and `[""]` are empty, `["", ""]` is not.
pub fn is_empty_value(value: Option<&FieldValue>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(_)) => false,
        Some(Value::Array(items)) => joined_text_is_empty(items),
        Some(Value::Object(map)) => map.is_empty(),
    }
}

/// Whether `items` joined with `","` is the empty string.
///
/// Inside an array `null` joins as nothing while booleans and objects join
/// as non-empty words.
fn joined_text_is_empty(items: &[Value]) -> bool {
    match items {
        [] => true,
        [Value::Null] => true,
        [Value::String(s)] => s.is_empty(),
        [Value::Array(inner)] => joined_text_is_empty(inner),
        _ => false,
    }
}

/// Derive a display label from a field name.
///
/// Splits on `_`, `-`, `.`, whitespace and camelCase boundaries, then
/// capitalizes each word: `first_name` becomes `First Name`, `postalCode`
/// becomes `Postal Code`.
pub fn generate_label(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in field.chars() {
        if matches!(c, '_' | '-' | '.') || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// FormRecord
// ---------------------------------------------------------------------------

/// In-memory [`Record`] backed by a JSON object.
///
/// Errors are kept per field in field-name order so repeated runs produce
/// the same listing.
#[derive(Debug, Clone, Default)]
pub struct FormRecord {
    form_name: String,
    values: serde_json::Map<String, Value>,
    labels: HashMap<String, String>,
    errors: BTreeMap<String, Vec<String>>,
}

impl FormRecord {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    /// Build a record without a form name from submitted values.
    pub fn from_values(values: serde_json::Map<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn with_values(mut self, values: serde_json::Map<String, Value>) -> Self {
        self.values = values;
        self
    }

    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels.extend(labels);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    /// All reported errors, keyed by field.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl Record for FormRecord {
    fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    fn label(&self, field: &str) -> String {
        self.labels
            .get(field)
            .cloned()
            .unwrap_or_else(|| generate_label(field))
    }

    fn report_error(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    fn form_name(&self) -> &str {
        &self.form_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- is_empty_value --

    #[test]
    fn absent_and_null_are_empty() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&Value::Null)));
    }

    #[test]
    fn empty_string_is_empty() {
        assert!(is_empty_value(Some(&json!(""))));
        assert!(!is_empty_value(Some(&json!(" "))));
        assert!(!is_empty_value(Some(&json!("555-1234"))));
    }

    #[test]
    fn scalars_follow_text_form() {
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(1.5))));
        assert!(is_empty_value(Some(&json!(false))));
        assert!(!is_empty_value(Some(&json!(true))));
    }

    #[test]
    fn collections_are_empty_without_elements() {
        assert!(is_empty_value(Some(&json!([]))));
        assert!(is_empty_value(Some(&json!({}))));
        assert!(!is_empty_value(Some(&json!(["a"]))));
        assert!(!is_empty_value(Some(&json!({"k": 1}))));
    }

    #[test]
    fn arrays_follow_joined_text() {
        assert!(is_empty_value(Some(&json!([""]))));
        assert!(is_empty_value(Some(&json!([null]))));
        assert!(is_empty_value(Some(&json!([[""]]))));
        assert!(!is_empty_value(Some(&json!(["", ""]))));
        assert!(!is_empty_value(Some(&json!([false]))));
        assert!(!is_empty_value(Some(&json!([0]))));
    }

    // -- generate_label --

    #[test]
    fn label_from_snake_case() {
        assert_eq!(generate_label("first_name"), "First Name");
    }

    #[test]
    fn label_from_camel_case() {
        assert_eq!(generate_label("postalCode"), "Postal Code");
    }

    #[test]
    fn label_from_single_word() {
        assert_eq!(generate_label("email"), "Email");
    }

    #[test]
    fn label_from_mixed_separators() {
        assert_eq!(generate_label("billing.zip-code"), "Billing Zip Code");
        assert_eq!(generate_label("__phone__"), "Phone");
    }

    // -- FormRecord --

    #[test]
    fn explicit_label_wins_over_generated() {
        let record = FormRecord::new("contact").with_label("email", "E-mail address");
        assert_eq!(record.label("email"), "E-mail address");
        assert_eq!(record.label("phone"), "Phone");
    }

    #[test]
    fn reported_errors_accumulate_per_field() {
        let mut record = FormRecord::default();
        record.report_error("email", "first".to_string());
        record.report_error("email", "second".to_string());

        assert!(record.has_errors());
        assert_eq!(record.errors_for("email"), ["first", "second"]);
        assert!(record.errors_for("phone").is_empty());

        record.clear_errors();
        assert!(!record.has_errors());
    }

    #[test]
    fn get_reads_set_values() {
        let mut record = FormRecord::from_values(serde_json::Map::new());
        assert!(record.get("email").is_none());
        record.set("email", json!("a@example.com"));
        assert_eq!(record.get("email"), Some(&json!("a@example.com")));
    }
}
