//! Style resolution.
//!
//! A raw style configuration is validated exactly once, when a
//! [`StyleResolver`] is constructed. Everything downstream reads typed
//! values through its accessors or the [`StyleSheet`] it builds.
//!
//! ```json
//! {
//!   "paragraph_styles": {"BodyStyle": {"font_size": 10, "alignment": "justify"}, ...},
//!   "margins": {"top": 15, "bottom": 15, "left": 12, "right": 12},
//!   "spacing": {"header_bottom": 4, "section_bottom": 2, ...},
//!   "links": {"social_link_color": "#1f4e79"}
//! }
//! ```
//!
//! Margins and spacing are in millimetres; paragraph style lengths are in
//! points.

mod color;
mod font;
mod paragraph;

pub use color::Color;
pub use font::{FontFace, FontFamily};
pub use paragraph::{Alignment, ParagraphStyle, StyleSheet, BASE_STYLE};

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::StyleName;
use paragraph::{check_inheritance, StyleDefinition};

/// Margin keys every configuration must define.
pub const REQUIRED_MARGIN_KEYS: [&str; 4] = ["top", "bottom", "left", "right"];

/// Spacing keys every configuration must define.
pub const REQUIRED_SPACING_KEYS: [&str; 5] = [
    "header_bottom",
    "section_bottom",
    "item_bottom",
    "small_bottom",
    "minimal_bottom",
];

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// A style configuration that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedStyleConfig {
    definitions: BTreeMap<String, StyleDefinition>,
    margins: BTreeMap<String, f32>,
    spacing: BTreeMap<String, f32>,
    social_link_color: Color,
}

impl ValidatedStyleConfig {
    /// Validate a raw style configuration.
    ///
    /// Fails on the first missing block, missing key or malformed value.
    pub fn validate(config: &Value) -> Result<Self> {
        let paragraph_styles = require_block(config, "paragraph_styles")?;

        let missing: Vec<&str> = StyleName::REQUIRED
            .iter()
            .map(|name| name.as_str())
            .filter(|name| !paragraph_styles.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "Style configuration missing required paragraph styles: {}",
                missing.join(", ")
            )));
        }

        let definitions = paragraph_styles
            .iter()
            .map(|(name, raw)| Ok((name.clone(), StyleDefinition::parse(name, raw)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        check_inheritance(&definitions)?;

        let margins = numeric_block(config, "margins", &REQUIRED_MARGIN_KEYS)?;
        let spacing = numeric_block(config, "spacing", &REQUIRED_SPACING_KEYS)?;
        let social_link_color = link_color(config)?;

        Ok(Self {
            definitions,
            margins,
            spacing,
            social_link_color,
        })
    }

    /// Convert every paragraph style definition into a resolved style.
    pub fn build_stylesheet(&self) -> StyleSheet {
        StyleSheet::from_definitions(&self.definitions)
    }
}

fn require_block<'a>(config: &'a Value, key: &str) -> Result<&'a Map<String, Value>> {
    config
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::config(format!("Style configuration missing '{}' dictionary", key)))
}

fn numeric_block(config: &Value, block: &str, required: &[&str]) -> Result<BTreeMap<String, f32>> {
    let entries = require_block(config, block)?;

    for key in required {
        if entries.get(*key).map_or(true, Value::is_null) {
            return Err(Error::config(format!(
                "Style configuration missing '{}.{}'",
                block, key
            )));
        }
    }

    entries
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| {
                Error::config(format!(
                    "Style configuration value '{}.{}' must be a non-negative number",
                    block, key
                ))
            })?;
            Ok((key.clone(), number as f32))
        })
        .collect()
}

fn link_color(config: &Value) -> Result<Color> {
    let links = require_block(config, "links")?;
    match links.get("social_link_color") {
        Some(Value::String(s)) if !s.trim().is_empty() => Color::parse(s),
        _ => Err(Error::config(
            "Style configuration missing 'links.social_link_color'",
        )),
    }
}

/// Typed, validated access to a style configuration.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    config: ValidatedStyleConfig,
    stylesheet: StyleSheet,
}

impl StyleResolver {
    /// Validate a raw configuration and build its stylesheet.
    pub fn new(config: &Value) -> Result<Self> {
        let config = ValidatedStyleConfig::validate(config)?;
        let stylesheet = config.build_stylesheet();
        log::debug!("Resolved {} paragraph styles", stylesheet.len());
        Ok(Self { config, stylesheet })
    }

    /// Get a margin in millimetres.
    pub fn margin(&self, edge: &str) -> Result<f32> {
        self.config
            .margins
            .get(edge)
            .copied()
            .ok_or_else(|| Error::config(format!("Style configuration missing 'margins.{}'", edge)))
    }

    /// Get a spacing value in millimetres.
    pub fn spacing(&self, key: &str) -> Result<f32> {
        self.config
            .spacing
            .get(key)
            .copied()
            .ok_or_else(|| Error::config(format!("Style configuration missing 'spacing.{}'", key)))
    }

    /// Color used for header social links.
    pub fn social_link_color(&self) -> Result<Color> {
        Ok(self.config.social_link_color)
    }

    /// All four page margins.
    pub fn margins(&self) -> Result<Margins> {
        Ok(Margins {
            top: self.margin("top")?,
            bottom: self.margin("bottom")?,
            left: self.margin("left")?,
            right: self.margin("right")?,
        })
    }

    /// The resolved stylesheet.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// The validated configuration.
    pub fn validated(&self) -> &ValidatedStyleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "paragraph_styles": {
                "NameStyle": {"font_name": "Helvetica-Bold", "font_size": 24, "alignment": "center"},
                "TitleStyle": {"font_name": "Helvetica-Bold", "font_size": 12, "alignment": "center"},
                "SectionTitleStyle": {"font_size": 14, "text_color": "#888888", "keep_with_next": true},
                "ItemTitleStyle": {"font_name": "Helvetica-Bold", "font_size": 12},
                "ItemSubtitleStyle": {"font_size": 11},
                "BodyStyle": {"font_size": 10, "alignment": "justify"},
                "ContactStyle": {"parent": "BodyStyle", "alignment": "center"},
                "DateStyle": {"font_size": 9}
            },
            "margins": {"top": 15, "bottom": 15, "left": 12, "right": "12"},
            "spacing": {
                "header_bottom": 4, "section_bottom": 2, "item_bottom": 3,
                "small_bottom": 2, "minimal_bottom": 1
            },
            "links": {"social_link_color": "#1f4e79"}
        })
    }

    #[test]
    fn test_resolver_accessors() {
        let resolver = StyleResolver::new(&sample()).unwrap();
        assert_eq!(resolver.margin("left").unwrap(), 12.0);
        assert_eq!(resolver.margin("right").unwrap(), 12.0);
        assert_eq!(resolver.spacing("section_bottom").unwrap(), 2.0);
        assert_eq!(resolver.social_link_color().unwrap(), Color::rgb(0x1f, 0x4e, 0x79));
        assert!(resolver.spacing("nope").unwrap_err().is_config());
        assert_eq!(resolver.stylesheet().len(), 8);
    }

    #[test]
    fn test_missing_required_style() {
        let mut config = sample();
        config["paragraph_styles"].as_object_mut().unwrap().remove("BodyStyle");
        let err = StyleResolver::new(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Style configuration missing required paragraph styles: BodyStyle"
        );
    }

    #[test]
    fn test_missing_blocks_and_keys() {
        for block in ["paragraph_styles", "margins", "spacing", "links"] {
            let mut config = sample();
            config.as_object_mut().unwrap().remove(block);
            let err = StyleResolver::new(&config).unwrap_err();
            assert!(err.to_string().contains(block), "{err}");
        }

        let mut config = sample();
        config["spacing"].as_object_mut().unwrap().remove("minimal_bottom");
        assert!(StyleResolver::new(&config)
            .unwrap_err()
            .to_string()
            .contains("'spacing.minimal_bottom'"));

        let mut config = sample();
        config["links"]["social_link_color"] = json!("  ");
        assert!(StyleResolver::new(&config)
            .unwrap_err()
            .to_string()
            .contains("links.social_link_color"));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = sample();
        config["margins"]["top"] = json!("wide");
        assert!(StyleResolver::new(&config).unwrap_err().is_config());

        let mut config = sample();
        config["links"]["social_link_color"] = json!("#zzzzzz");
        assert!(StyleResolver::new(&config).unwrap_err().is_config());

        let mut config = sample();
        config["paragraph_styles"]["DateStyle"]["alignment"] = json!("diagonal");
        assert!(StyleResolver::new(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_build_stylesheet_is_deterministic() {
        let validated = ValidatedStyleConfig::validate(&sample()).unwrap();
        assert_eq!(validated.build_stylesheet(), validated.build_stylesheet());
    }
}
