//! Client-side rendering support.
//!
//! Rules that can mirror their check in the browser need the DOM id of each
//! field's input element. [`ClientIdResolver`] supplies those ids;
//! [`FormInputIds`] derives them the way server-rendered forms name inputs.

use serde::Serialize;

use crate::error::CoreError;
use crate::record::Record;

/// Resolves the input-element id a field is rendered with.
pub trait ClientIdResolver: Send + Sync {
    fn input_id_for(&self, record: &dyn Record, field: &str) -> String;
}

/// Derives ids from the input name `FormName[field]`.
///
/// The name is lower-cased, `[]` is dropped, `][`, `[`, spaces and dots become
/// `-`, and `]` is dropped: `ContactForm[email]` becomes `contactform-email`.
/// Without a form name the id is the lower-cased field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormInputIds;

impl ClientIdResolver for FormInputIds {
    fn input_id_for(&self, record: &dyn Record, field: &str) -> String {
        let name = input_name(record.form_name(), field).to_lowercase();
        name.replace("[]", "")
            .replace("][", "-")
            .replace('[', "-")
            .replace(']', "")
            .replace([' ', '.'], "-")
    }
}

/// Input name for `field` inside `form_name`.
///
/// A field written with a leading index (`[0]email`) keeps the index next to
/// the form name: `Items[0][email]`.
pub fn input_name(form_name: &str, field: &str) -> String {
    if form_name.is_empty() {
        return field.to_string();
    }
    match field.rfind(']') {
        Some(end) if field.starts_with('[') => {
            let (prefix, attribute) = field.split_at(end + 1);
            format!("{form_name}{prefix}[{attribute}]")
        }
        _ => format!("{form_name}[{field}]"),
    }
}

/// A rendered client-side check for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientScript {
    pub field: String,
    pub script: String,
}

/// Serialize `value` as JSON that can be embedded in an inline `<script>`.
///
/// Slashes and non-ASCII characters stay unescaped; the `</` sequence is
/// written as `<\/` so the payload cannot close the surrounding element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let json = serde_json::to_string(value)
        .map_err(|e| CoreError::Validation(format!("Unserializable client options: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FormRecord;
    use serde_json::json;

    #[test]
    fn id_from_form_and_field() {
        let record = FormRecord::new("ContactForm");
        assert_eq!(FormInputIds.input_id_for(&record, "email"), "contactform-email");
    }

    #[test]
    fn id_without_form_name() {
        let record = FormRecord::default();
        assert_eq!(FormInputIds.input_id_for(&record, "Phone"), "phone");
    }

    #[test]
    fn id_for_tabular_field() {
        let record = FormRecord::new("Item");
        assert_eq!(input_name("Item", "[0]price"), "Item[0][price]");
        assert_eq!(FormInputIds.input_id_for(&record, "[0]price"), "item-0-price");
    }

    #[test]
    fn id_replaces_dots_and_spaces() {
        let record = FormRecord::new("Order");
        assert_eq!(
            FormInputIds.input_id_for(&record, "billing.zip code"),
            "order-billing-zip-code"
        );
    }

    #[test]
    fn script_json_escapes_closing_tags() {
        let out = script_json(&json!({"message": "</script><b>é/ok</b>"})).unwrap();
        assert_eq!(out, r#"{"message":"<\/script><b>é/ok<\/b>"}"#);
    }
}
