//! Section formatters.
//!
//! Every CV section type (experience, education, skills, ...) has a
//! formatter that turns one data item into styled elements. Formatters are
//! looked up by section type through a [`FormatterRegistry`].
//!
//! # Example
//!
//! ```
//! use cvpdf::sections::FormatterRegistry;
//!
//! let registry = FormatterRegistry::with_defaults();
//! assert!(registry.get_formatter("experience").is_some());
//! assert!(registry.get_formatter("hobbies").is_none());
//! ```

mod registry;
mod simple;
mod timeline;

pub use registry::FormatterRegistry;
pub use simple::{
    AwardsFormatter, CertificationsFormatter, CoreSkillsFormatter, LanguagesFormatter,
    SkillsFormatter,
};
pub use timeline::{EducationFormatter, ExperienceFormatter, TimelineFormatter};

use serde_json::Value;

use crate::error::Result;
use crate::locale::{self, escape_preserving_tags, rich_text};
use crate::model::{Element, StyleName, Translations};
use crate::style::StyleResolver;

/// Separator between a bold label and its detail text.
pub const DETAIL_SEPARATOR: &str = " - ";

/// Marker prepended to bullet items.
pub const BULLET: &str = "\u{2022} ";

/// Read-only state shared by every formatter during one render.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    /// Requested language code
    pub language: &'a str,

    /// Translation table for fixed labels
    pub translations: &'a Translations,

    /// Validated style configuration
    pub styles: &'a StyleResolver,
}

impl<'a> FormatContext<'a> {
    pub fn new(language: &'a str, translations: &'a Translations, styles: &'a StyleResolver) -> Self {
        Self {
            language,
            translations,
            styles,
        }
    }

    /// Resolve a localized scalar field of an item.
    pub fn field(&self, item: &Value, name: &str) -> String {
        locale::resolve_field(item, name, self.language, "")
    }

    /// Resolve a localized list field of an item.
    pub fn list(&self, item: &Value, name: &str) -> Vec<String> {
        locale::resolve_list(item, name, self.language)
    }

    /// Date range of a timeline item.
    pub fn period(&self, item: &Value) -> String {
        locale::format_period(item, self.language, self.translations)
    }

    /// A spacer with the height of a configured spacing key.
    pub fn spacer(&self, key: &str) -> Result<Element> {
        Ok(Element::spacer(self.styles.spacing(key)?))
    }
}

/// Converts one section item into document elements.
///
/// Implement this trait to support a new section type, then register the
/// formatter with [`FormatterRegistry::register`].
pub trait SectionFormatter: Send + Sync {
    /// Section type identifier, e.g. `"experience"`.
    fn section_type(&self) -> &str;

    /// Format a single item.
    ///
    /// Missing optional fields produce fewer elements, never an error.
    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>>;
}

/// Append a bold paragraph when `text` is non-empty.
pub fn push_bold(elements: &mut Vec<Element>, text: &str, style: StyleName) {
    if !text.is_empty() {
        elements.push(Element::paragraph(
            format!("<b>{}</b>", escape_preserving_tags(text)),
            style,
        ));
    }
}

/// Append an italic paragraph when `text` is non-empty.
pub fn push_italic(elements: &mut Vec<Element>, text: &str, style: StyleName) {
    if !text.is_empty() {
        elements.push(Element::paragraph(
            format!("<i>{}</i>", escape_preserving_tags(text)),
            style,
        ));
    }
}

/// Append an escaped paragraph when `text` is non-empty.
pub fn push_plain(elements: &mut Vec<Element>, text: &str, style: StyleName) {
    if !text.is_empty() {
        elements.push(Element::paragraph(escape_preserving_tags(text), style));
    }
}

/// `<b>main</b> - detail`, without a dangling separator when either side
/// is empty.
pub fn bold_with_detail(main: &str, detail: &str) -> String {
    let main = escape_preserving_tags(main);
    let detail = escape_preserving_tags(detail);
    match (main.is_empty(), detail.is_empty()) {
        (false, false) => format!("<b>{}</b>{}{}", main, DETAIL_SEPARATOR, detail),
        (false, true) => main,
        _ => detail,
    }
}

/// Append a body paragraph built by [`bold_with_detail`].
pub fn push_composite(elements: &mut Vec<Element>, main: &str, detail: &str) {
    let markup = bold_with_detail(main, detail);
    if !markup.is_empty() {
        elements.push(Element::paragraph(markup, StyleName::Body));
    }
}

/// Append one bullet paragraph per description. Line breaks inside a
/// description are kept.
pub fn push_bullets(elements: &mut Vec<Element>, descriptions: &[String]) {
    for description in descriptions {
        elements.push(Element::paragraph(
            format!("{}{}", BULLET, rich_text(description)),
            StyleName::Body,
        ));
    }
}

/// Append the values as one comma-separated body paragraph.
pub fn push_comma_list(elements: &mut Vec<Element>, values: &[String]) {
    push_plain(elements, &values.join(", "), StyleName::Body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_with_detail() {
        assert_eq!(bold_with_detail("English", "Fluent"), "<b>English</b> - Fluent");
        assert_eq!(bold_with_detail("English", ""), "English");
        assert_eq!(bold_with_detail("", "Fluent"), "Fluent");
        assert_eq!(bold_with_detail("", ""), "");
        assert_eq!(bold_with_detail("R&D", "A<B"), "<b>R&amp;D</b> - A&lt;B");
    }

    #[test]
    fn test_push_helpers_skip_empty_text() {
        let mut elements = Vec::new();
        push_bold(&mut elements, "", StyleName::ItemTitle);
        push_italic(&mut elements, "", StyleName::Date);
        push_plain(&mut elements, "", StyleName::Body);
        push_composite(&mut elements, "", "");
        push_comma_list(&mut elements, &[]);
        assert!(elements.is_empty());
    }

    #[test]
    fn test_push_bullets() {
        let mut elements = Vec::new();
        push_bullets(
            &mut elements,
            &["Built <b>CI</b>\nand CD".to_string(), "Cut costs & time".to_string()],
        );
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].markup(), Some("\u{2022} Built <b>CI</b><br/>and CD"));
        assert_eq!(elements[1].markup(), Some("\u{2022} Cut costs &amp; time"));
        assert_eq!(elements[1].style(), Some(StyleName::Body));
    }
}
