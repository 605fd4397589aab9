//! Message formatting and translation.
//!
//! Rule messages are templates with `{name}` placeholders. A
//! [`MessageFormatter`] turns a template plus named parameters into the final
//! text for a locale; [`I18n`] pairs a formatter with the active language.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DEFAULT_LANGUAGE;

/// Regex pattern matching `{placeholder}` tokens in message templates.
pub const PLACEHOLDER_PATTERN: &str = r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Formats a message template for a locale.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, template: &str, params: &[(&str, &str)], locale: &str) -> String;
}

/// Replace `{name}` tokens with the matching parameter.
///
/// Placeholders without a parameter are left as written.
pub fn substitute_placeholders(template: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Substitutes placeholders and ignores the locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderFormatter;

impl MessageFormatter for PlaceholderFormatter {
    fn format(&self, template: &str, params: &[(&str, &str)], _locale: &str) -> String {
        substitute_placeholders(template, params)
    }
}

// ---------------------------------------------------------------------------
// MessageCatalog
// ---------------------------------------------------------------------------

/// Per-locale translations of message templates.
///
/// Serialized as `{ "<locale>": { "<source template>": "<translation>" } }`.
/// Lookup tries the exact locale first, then its language part (`de` for
/// `de-CH`). Templates with no translation are used as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    translations: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid message catalog: {e}")))
    }

    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        source: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.translations
            .entry(locale.into())
            .or_default()
            .insert(source.into(), translation.into());
    }

    /// Number of locales with at least one translation.
    pub fn locale_count(&self) -> usize {
        self.translations.len()
    }

    /// Translate `source` into `locale`, falling back to the source itself.
    pub fn translate<'a>(&'a self, source: &'a str, locale: &str) -> &'a str {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        [locale, language]
            .into_iter()
            .find_map(|key| self.translations.get(key)?.get(source))
            .map(String::as_str)
            .unwrap_or(source)
    }
}

impl MessageFormatter for MessageCatalog {
    fn format(&self, template: &str, params: &[(&str, &str)], locale: &str) -> String {
        substitute_placeholders(self.translate(template, locale), params)
    }
}

// ---------------------------------------------------------------------------
// I18n
// ---------------------------------------------------------------------------

/// A formatter together with the language messages are rendered in.
#[derive(Clone)]
pub struct I18n {
    formatter: Arc<dyn MessageFormatter>,
    language: String,
}

impl I18n {
    pub fn new(formatter: Arc<dyn MessageFormatter>, language: impl Into<String>) -> Self {
        Self {
            formatter,
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Same formatter, different language.
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            formatter: Arc::clone(&self.formatter),
            language: language.into(),
        }
    }

    pub fn format(&self, template: &str, params: &[(&str, &str)]) -> String {
        self.formatter.format(template, params, &self.language)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(Arc::new(PlaceholderFormatter), DEFAULT_LANGUAGE)
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
