use formrule_core::i18n::I18n;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the formatter is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Message formatter in the configured default language.
    pub i18n: I18n,
}

impl AppState {
    /// The formatter for a request, in its language when one was given.
    pub fn i18n_for(&self, language: Option<&str>) -> I18n {
        match language {
            Some(lang) => self.i18n.with_language(lang),
            None => self.i18n.clone(),
        }
    }
}
