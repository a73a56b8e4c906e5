//! Localization resolver.
//!
//! A localized field may be stored three ways on a data node:
//!
//! - as a language-keyed map: `"position": {"pt": "...", "en": "..."}`
//! - as suffixed sibling keys: `"position_pt"`, `"position_en"`
//! - as a single unsuffixed value: `"position"`
//!
//! Resolution walks a fixed fallback chain (requested language, then
//! Portuguese, then the unsuffixed/`default` value, then the caller's
//! default). Blank strings and empty lists count as absent, so a
//! present-but-empty translation never masks an available fallback.
//! Absence is never an error.

mod period;
mod text;

pub use period::{builtin_months, format_period, month_abbreviation};
pub use text::{escape_attribute, escape_preserving_tags, rich_text, sanitize_filename_component};

use serde_json::{Map, Value};

/// Universal fallback language.
pub const FALLBACK_LANGUAGE: &str = "pt";

/// Key of the language-neutral entry in a language-keyed map.
pub const DEFAULT_VARIANT: &str = "default";

/// Resolve a localized scalar field, returning `default` when every
/// candidate is absent or blank.
pub fn resolve_field(node: &Value, field: &str, language: &str, default: &str) -> String {
    try_resolve_field(node, field, language).unwrap_or_else(|| default.to_string())
}

/// Resolve a localized scalar field, or `None` when every candidate is
/// absent or blank.
pub fn try_resolve_field(node: &Value, field: &str, language: &str) -> Option<String> {
    resolve_with(node, field, language, scalar_text)
}

/// Resolve a localized list field (e.g. bullet descriptions).
///
/// Blank entries are dropped; an empty list is treated as absent and the
/// chain continues. Returns an empty vector when nothing resolves.
pub fn resolve_list(node: &Value, field: &str, language: &str) -> Vec<String> {
    resolve_with(node, field, language, list_items).unwrap_or_default()
}

fn resolve_with<T>(
    node: &Value,
    field: &str,
    language: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let object = node.as_object()?;

    // Only an object keyed by a candidate language or `default` is a
    // language map; any other object falls through to the suffixed keys.
    if let Some(Value::Object(variants)) = object.get(field) {
        let keys = candidate_keys(language, DEFAULT_VARIANT);
        if keys.iter().any(|key| variants.contains_key(key.as_str())) {
            return keys
                .iter()
                .find_map(|key| variants.get(key.as_str()).and_then(&extract));
        }
    }

    let suffixed = candidate_languages(language)
        .into_iter()
        .map(|lang| format!("{}_{}", field, lang));
    suffixed
        .chain(std::iter::once(field.to_string()))
        .find_map(|key| object.get(&key).and_then(&extract))
}

/// Languages tried, in order, before the unsuffixed value.
pub fn candidate_languages(language: &str) -> Vec<&str> {
    if language == FALLBACK_LANGUAGE {
        vec![language]
    } else {
        vec![language, FALLBACK_LANGUAGE]
    }
}

fn candidate_keys(language: &str, neutral: &str) -> Vec<String> {
    let mut keys: Vec<String> = candidate_languages(language)
        .into_iter()
        .map(str::to_string)
        .collect();
    keys.push(neutral.to_string());
    keys
}

/// Pick the first non-blank entry of a language-keyed map following the
/// fallback chain.
pub fn select_variant<'a>(variants: &'a Map<String, Value>, language: &str) -> Option<&'a Value> {
    candidate_keys(language, DEFAULT_VARIANT)
        .iter()
        .filter_map(|key| variants.get(key.as_str()))
        .find(|value| scalar_text(value).is_some() || list_items(value).is_some())
}

/// Convert a scalar JSON value to trimmed text; blank strings, null,
/// arrays and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn list_items(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value.as_array()?.iter().filter_map(scalar_text).collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_field_prefers_target_language() {
        let node = json!({"position_pt": "Desenvolvedor", "position_en": "Developer"});
        assert_eq!(resolve_field(&node, "position", "en", ""), "Developer");
        assert_eq!(resolve_field(&node, "position", "pt", ""), "Desenvolvedor");
    }

    #[test]
    fn test_resolve_field_falls_back_to_portuguese() {
        let node = json!({"position_pt": "Desenvolvedor", "position": "Generic"});
        assert_eq!(resolve_field(&node, "position", "en", ""), "Desenvolvedor");
    }

    #[test]
    fn test_resolve_field_empty_translation_does_not_mask_fallback() {
        let node = json!({"position_en": "   ", "position_pt": "Desenvolvedor"});
        assert_eq!(resolve_field(&node, "position", "en", ""), "Desenvolvedor");
    }

    #[test]
    fn test_resolve_field_unsuffixed_then_default() {
        let node = json!({"position": " Engineer "});
        assert_eq!(resolve_field(&node, "position", "en", "x"), "Engineer");

        let node = json!({"position_en": "", "position_pt": "", "position": ""});
        assert_eq!(resolve_field(&node, "position", "en", "fallback"), "fallback");
    }

    #[test]
    fn test_resolve_field_language_map() {
        let node = json!({"degree": {"pt": "Bacharelado", "en": ""}});
        assert_eq!(resolve_field(&node, "degree", "en", ""), "Bacharelado");

        let node = json!({"degree": {"default": "BSc"}});
        assert_eq!(resolve_field(&node, "degree", "en", ""), "BSc");

        let node = json!({"degree": {"es": "Grado"}});
        assert_eq!(resolve_field(&node, "degree", "en", "none"), "none");
        assert_eq!(resolve_field(&node, "degree", "es", "none"), "Grado");
    }

    #[test]
    fn test_resolve_field_object_without_language_keys_uses_suffixes() {
        let node = json!({"position": {"foo": 1}, "position_en": "Engineer"});
        assert_eq!(resolve_field(&node, "position", "en", ""), "Engineer");

        let node = json!({
            "description": {"items": ["x"]},
            "description_pt": ["Criou pipelines"]
        });
        assert_eq!(resolve_list(&node, "description", "en"), vec!["Criou pipelines"]);

        // a blank Portuguese entry still marks a language map
        let node = json!({"position": {"pt": ""}, "position_en": "Engineer"});
        assert_eq!(resolve_field(&node, "position", "en", "none"), "none");
    }

    #[test]
    fn test_resolve_field_non_object_node() {
        assert_eq!(resolve_field(&json!("text"), "a", "en", "d"), "d");
        assert_eq!(resolve_field(&Value::Null, "a", "en", ""), "");
    }

    #[test]
    fn test_resolve_field_numbers_become_text() {
        let node = json!({"year": 2024});
        assert_eq!(resolve_field(&node, "year", "pt", ""), "2024");
    }

    #[test]
    fn test_resolve_list_chain() {
        let node = json!({
            "description_en": [],
            "description_pt": ["Criou pipelines", "  "],
            "description": ["Generic"]
        });
        assert_eq!(resolve_list(&node, "description", "en"), vec!["Criou pipelines"]);

        let node = json!({"description": {"en": ["Built CI"], "pt": ["Criou CI"]}});
        assert_eq!(resolve_list(&node, "description", "en"), vec!["Built CI"]);
        assert!(resolve_list(&json!({}), "description", "en").is_empty());
    }

    #[test]
    fn test_resolve_list_ignores_scalar_values() {
        let node = json!({"description_en": "not a list", "description_pt": ["ok"]});
        assert_eq!(resolve_list(&node, "description", "en"), vec!["ok"]);
    }

    #[test]
    fn test_additional_language_only_needs_suffix() {
        let node = json!({"position_es": "Desarrollador", "position_pt": "Desenvolvedor"});
        assert_eq!(resolve_field(&node, "position", "es", ""), "Desarrollador");
        assert_eq!(candidate_languages("es"), vec!["es", "pt"]);
        assert_eq!(candidate_languages("pt"), vec!["pt"]);
    }
}
