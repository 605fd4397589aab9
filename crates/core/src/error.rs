#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A rule was set up with an unusable configuration. Fatal to the rule.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
