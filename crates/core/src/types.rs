/// Field values are carried as JSON, the same shape a form submission arrives in.
pub type FieldValue = serde_json::Value;

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en-US";
