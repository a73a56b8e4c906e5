//! Paragraph style definitions and stylesheet construction.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::color::Color;
use super::font::FontFace;
use crate::error::{Error, Result};
use crate::model::StyleName;

/// Name of the implicit root style every definition inherits from.
pub const BASE_STYLE: &str = "Normal";

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse a configured alignment: a name (`left`, `center`, `right`,
    /// `justify`) or a numeric code (0 left, 1 center, 2 right, 3 or 4
    /// justify).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "left" => Some(Alignment::Left),
                "center" | "centre" => Some(Alignment::Center),
                "right" => Some(Alignment::Right),
                "justify" => Some(Alignment::Justify),
                _ => None,
            },
            Value::Number(n) => match n.as_u64()? {
                0 => Some(Alignment::Left),
                1 => Some(Alignment::Center),
                2 => Some(Alignment::Right),
                3 | 4 => Some(Alignment::Justify),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A fully resolved paragraph style. Lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: String,
    pub font: FontFace,
    pub font_size: f32,
    pub leading: f32,
    pub text_color: Color,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub keep_with_next: bool,
}

/// Settings of one definition; `None` means "inherit from parent".
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct StyleDefinition {
    pub parent: Option<String>,
    pub font: Option<FontFace>,
    pub font_size: Option<f32>,
    pub leading: Option<f32>,
    pub text_color: Option<Color>,
    pub alignment: Option<Alignment>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub left_indent: Option<f32>,
    pub keep_with_next: Option<bool>,
}

impl StyleDefinition {
    /// Parse and check one entry of `paragraph_styles`.
    pub fn parse(style: &str, raw: &Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(Error::config(format!(
                "Paragraph style '{}' must be a dictionary",
                style
            )));
        };

        let font = match map.get("font_name") {
            None => None,
            Some(value) => {
                let name = value.as_str().unwrap_or_default();
                Some(FontFace::from_name(name).ok_or_else(|| {
                    Error::config(format!(
                        "Paragraph style '{}' uses unknown font '{}'",
                        style,
                        value_text(value)
                    ))
                })?)
            }
        };

        let text_color = match map.get("text_color") {
            None => None,
            Some(Value::String(s)) if !s.trim().is_empty() => {
                Some(Color::parse(s).map_err(|_| {
                    Error::config(format!("Invalid paragraph style color: {}", s))
                })?)
            }
            Some(_) => {
                return Err(Error::config(format!(
                    "Paragraph style '{}' field 'text_color' must be a non-empty string",
                    style
                )))
            }
        };

        let alignment = match map.get("alignment") {
            None => None,
            Some(value) => Some(Alignment::from_value(value).ok_or_else(|| {
                Error::config(format!(
                    "Paragraph style '{}' has invalid alignment '{}' (expected left, center, right or justify)",
                    style,
                    value_text(value)
                ))
            })?),
        };

        let keep_with_next = match map.get("keep_with_next") {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Number(n)) if matches!(n.as_u64(), Some(0 | 1)) => {
                Some(n.as_u64() == Some(1))
            }
            Some(value) => {
                return Err(Error::config(format!(
                    "Paragraph style '{}' field 'keep_with_next' must be a boolean, got '{}'",
                    style,
                    value_text(value)
                )))
            }
        };

        let parent = match map.get("parent") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(value) => {
                return Err(Error::config(format!(
                    "Paragraph style '{}' has invalid parent '{}'",
                    style,
                    value_text(value)
                )))
            }
        };

        let font_size = length(map, style, "font_size")?;
        if font_size.is_some_and(|size| size <= 0.0) {
            return Err(Error::config(format!(
                "Paragraph style '{}' field 'font_size' must be positive",
                style
            )));
        }

        Ok(Self {
            parent,
            font,
            font_size,
            leading: length(map, style, "leading")?,
            text_color,
            alignment,
            space_before: length(map, style, "space_before")?,
            space_after: length(map, style, "space_after")?,
            left_indent: length(map, style, "left_indent")?,
            keep_with_next,
        })
    }

    fn overlay(&self, base: &Resolved) -> Resolved {
        Resolved {
            font: self.font.unwrap_or(base.font),
            font_size: self.font_size.unwrap_or(base.font_size),
            leading: self.leading.or(base.leading),
            text_color: self.text_color.unwrap_or(base.text_color),
            alignment: self.alignment.unwrap_or(base.alignment),
            space_before: self.space_before.unwrap_or(base.space_before),
            space_after: self.space_after.unwrap_or(base.space_after),
            left_indent: self.left_indent.unwrap_or(base.left_indent),
            keep_with_next: self.keep_with_next.unwrap_or(base.keep_with_next),
        }
    }
}

fn length(map: &Map<String, Value>, style: &str, key: &str) -> Result<Option<f32>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_f64() {
            Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n as f32)),
            _ => Err(Error::config(format!(
                "Paragraph style '{}' field '{}' must be a non-negative number, got '{}'",
                style,
                key,
                value_text(value)
            ))),
        },
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Intermediate values while walking the inheritance chain. Leading stays
/// optional so that a child with a larger font does not inherit a cramped
/// line height.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    font: FontFace,
    font_size: f32,
    leading: Option<f32>,
    text_color: Color,
    alignment: Alignment,
    space_before: f32,
    space_after: f32,
    left_indent: f32,
    keep_with_next: bool,
}

impl Resolved {
    fn normal() -> Self {
        Self {
            font: FontFace::HELVETICA,
            font_size: 10.0,
            leading: None,
            text_color: Color::BLACK,
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            keep_with_next: false,
        }
    }

    fn finish(self, name: &str) -> ParagraphStyle {
        ParagraphStyle {
            name: name.to_string(),
            font: self.font,
            font_size: self.font_size,
            leading: self.leading.unwrap_or(self.font_size * 1.2),
            text_color: self.text_color,
            alignment: self.alignment,
            space_before: self.space_before,
            space_after: self.space_after,
            left_indent: self.left_indent,
            keep_with_next: self.keep_with_next,
        }
    }
}

/// Check that every `parent` names a configured style or `Normal`, and
/// that no inheritance chain loops.
pub(crate) fn check_inheritance(definitions: &BTreeMap<String, StyleDefinition>) -> Result<()> {
    for (name, definition) in definitions {
        if let Some(parent) = &definition.parent {
            if parent != BASE_STYLE && !definitions.contains_key(parent) {
                return Err(Error::config(format!(
                    "Paragraph style '{}' inherits from unknown style '{}'",
                    name, parent
                )));
            }
        }

        let mut seen = vec![name.as_str()];
        let mut current = definition;
        while let Some(parent) = current.parent.as_deref() {
            if parent == BASE_STYLE {
                break;
            }
            if seen.contains(&parent) {
                return Err(Error::config(format!(
                    "Paragraph style inheritance cycle: {} -> {}",
                    seen.join(" -> "),
                    parent
                )));
            }
            seen.push(parent);
            match definitions.get(parent) {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    Ok(())
}

/// A set of resolved paragraph styles keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    styles: BTreeMap<String, ParagraphStyle>,
}

impl StyleSheet {
    /// Resolve every definition against its parent chain.
    pub(crate) fn from_definitions(definitions: &BTreeMap<String, StyleDefinition>) -> Self {
        let styles = definitions
            .keys()
            .map(|name| {
                let style = resolve_chain(name, definitions).finish(name);
                (name.clone(), style)
            })
            .collect();
        Self { styles }
    }

    /// Get a required style.
    pub fn get(&self, name: StyleName) -> Result<&ParagraphStyle> {
        self.get_by_name(name.as_str())
            .ok_or_else(|| Error::config(format!("Paragraph style '{}' is not defined", name)))
    }

    /// Get any style by its configured name.
    pub fn get_by_name(&self, name: &str) -> Option<&ParagraphStyle> {
        self.styles.get(name)
    }

    /// Iterate over every style in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ParagraphStyle> {
        self.styles.values()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

// Inheritance has been checked, so the walk always terminates.
fn resolve_chain(name: &str, definitions: &BTreeMap<String, StyleDefinition>) -> Resolved {
    let mut chain = Vec::new();
    let mut current = definitions.get(name);
    while let Some(definition) = current {
        chain.push(definition);
        current = match definition.parent.as_deref() {
            Some(parent) if parent != BASE_STYLE && chain.len() <= definitions.len() => {
                definitions.get(parent)
            }
            _ => None,
        };
    }

    chain
        .iter()
        .rev()
        .fold(Resolved::normal(), |base, definition| definition.overlay(&base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definitions(value: Value) -> BTreeMap<String, StyleDefinition> {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), StyleDefinition::parse(k, v).unwrap()))
            .collect()
    }

    #[test]
    fn test_alignment_vocabulary() {
        assert_eq!(Alignment::from_value(&json!("CENTER")), Some(Alignment::Center));
        assert_eq!(Alignment::from_value(&json!(2)), Some(Alignment::Right));
        assert_eq!(Alignment::from_value(&json!(4)), Some(Alignment::Justify));
        assert_eq!(Alignment::from_value(&json!("middle")), None);
        assert_eq!(Alignment::from_value(&json!(true)), None);
    }

    #[test]
    fn test_inherits_from_parent_and_normal() {
        let defs = definitions(json!({
            "BodyStyle": {"font_size": 10, "left_indent": 28, "alignment": "justify"},
            "ContactStyle": {"parent": "BodyStyle", "font_size": 11, "alignment": "center", "left_indent": 0}
        }));
        check_inheritance(&defs).unwrap();
        let sheet = StyleSheet::from_definitions(&defs);

        let contact = sheet.get(StyleName::Contact).unwrap();
        assert_eq!(contact.font, FontFace::HELVETICA);
        assert_eq!(contact.font_size, 11.0);
        assert_eq!(contact.alignment, Alignment::Center);
        assert_eq!(contact.left_indent, 0.0);
        assert!((contact.leading - 13.2).abs() < 1e-4);

        let body = sheet.get(StyleName::Body).unwrap();
        assert_eq!(body.alignment, Alignment::Justify);
        assert_eq!(body.text_color, Color::BLACK);
    }

    #[test]
    fn test_explicit_leading_is_inherited() {
        let defs = definitions(json!({
            "BodyStyle": {"font_size": 10, "leading": 14},
            "DateStyle": {"parent": "BodyStyle", "font_size": 9}
        }));
        let sheet = StyleSheet::from_definitions(&defs);
        assert_eq!(sheet.get(StyleName::Date).unwrap().leading, 14.0);
    }

    #[test]
    fn test_invalid_definitions() {
        let cases = [
            json!({"font_name": "Papyrus"}),
            json!({"alignment": "middle"}),
            json!({"text_color": "#12"}),
            json!({"text_color": ""}),
            json!({"font_size": -1}),
            json!({"space_after": "lots"}),
            json!({"keep_with_next": "yes"}),
            json!("not a dict"),
        ];
        for case in cases {
            let err = StyleDefinition::parse("BodyStyle", &case).unwrap_err();
            assert!(err.is_config(), "{case} should be rejected");
        }
    }

    #[test]
    fn test_unknown_parent_and_cycles() {
        let defs = definitions(json!({"BodyStyle": {"parent": "Missing"}}));
        assert!(check_inheritance(&defs).unwrap_err().to_string().contains("unknown style"));

        let defs = definitions(json!({
            "A": {"parent": "B"},
            "B": {"parent": "C"},
            "C": {"parent": "A"}
        }));
        assert!(check_inheritance(&defs).unwrap_err().to_string().contains("cycle"));
    }
}
