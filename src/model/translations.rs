//! Translation table for fixed UI labels.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::locale::{scalar_text, select_variant};

/// Translation table.
///
/// Two layouts are accepted:
///
/// ```json
/// {"pt": {"sections": {"experience": "Experiência"}, "labels": {"current": "Atual"}}}
/// {"sections": {"experience": {"pt": "Experiência", "en": "Experience"}}}
/// ```
///
/// The first is scoped per language; the second keeps language variants at
/// the leaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    root: Map<String, Value>,
}

impl Translations {
    /// Create an empty table; every lookup yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(Error::config(
                "Translations must be a JSON object keyed by language or section",
            )),
        }
    }

    /// Look up `section.key` for a language.
    ///
    /// Returns `None` when the entry is missing or blank.
    pub fn get(&self, language: &str, section: &str, key: &str) -> Option<String> {
        if let Some(Value::Object(scope)) = self.root.get(language) {
            return scope
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(scalar_text);
        }

        match self.root.get(section).and_then(|s| s.get(key))? {
            Value::Object(variants) => select_variant(variants, language).and_then(scalar_text),
            other => scalar_text(other),
        }
    }

    /// Look up a label, falling back to `default`.
    pub fn label(&self, language: &str, key: &str, default: &str) -> String {
        self.get(language, "labels", key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Title for a section type; the type identifier is used when untranslated.
    pub fn section_title(&self, language: &str, section_type: &str) -> String {
        self.get(language, "sections", section_type)
            .unwrap_or_else(|| section_type.to_string())
    }

    /// Localized "present" marker used for open-ended date ranges.
    pub fn present_label(&self, language: &str) -> String {
        let default = if language == "pt" { "Atual" } else { "Present" };
        self.label(language, "current", default)
    }

    /// Languages the table has entries for, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut scoped: Vec<String> = self
            .root
            .iter()
            .filter(|(key, value)| {
                !matches!(key.as_str(), "sections" | "labels")
                    && value
                        .as_object()
                        .is_some_and(|scope| scope.contains_key("sections") || scope.contains_key("labels"))
            })
            .map(|(key, _)| key.clone())
            .collect();
        if !scoped.is_empty() {
            scoped.sort();
            return scoped;
        }

        let mut languages: Vec<String> = ["sections", "labels"]
            .iter()
            .filter_map(|section| self.root.get(*section)?.as_object())
            .flat_map(|entries| entries.values())
            .filter_map(Value::as_object)
            .flat_map(|variants| variants.keys())
            .filter(|key| key.as_str() != crate::locale::DEFAULT_VARIANT)
            .cloned()
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }

    /// Month abbreviations overriding the built-in tables.
    ///
    /// Only a complete list of twelve strings is accepted.
    pub fn months(&self, language: &str) -> Option<Vec<String>> {
        let months = match self.root.get(language) {
            Some(Value::Object(scope)) => scope.get("labels")?.get("months")?,
            _ => {
                let value = self.root.get("labels")?.get("months")?;
                match value {
                    Value::Object(variants) => select_variant(variants, language)?,
                    other => other,
                }
            }
        };

        let list = months.as_array()?;
        if list.len() != 12 {
            log::warn!(
                "Ignoring labels.months for '{}': expected 12 entries, found {}",
                language,
                list.len()
            );
            return None;
        }
        list.iter()
            .map(|m| m.as_str().map(|s| s.trim().to_string()))
            .collect()
    }
}
