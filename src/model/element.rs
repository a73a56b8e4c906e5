//! Output element stream types.

use serde::{Deserialize, Serialize};

/// The named paragraph styles every style configuration must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleName {
    /// Candidate name at the top of the page
    Name,
    /// Desired role under the name
    Title,
    /// Section headings
    SectionTitle,
    /// First line of a section item
    ItemTitle,
    /// Second line of a section item
    ItemSubtitle,
    /// Body text and bullets
    Body,
    /// Contact and social link lines
    Contact,
    /// Date ranges
    Date,
}

impl StyleName {
    /// All required styles, in declaration order.
    pub const REQUIRED: [StyleName; 8] = [
        StyleName::Name,
        StyleName::Title,
        StyleName::SectionTitle,
        StyleName::ItemTitle,
        StyleName::ItemSubtitle,
        StyleName::Body,
        StyleName::Contact,
        StyleName::Date,
    ];

    /// Key of this style in the `paragraph_styles` block.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleName::Name => "NameStyle",
            StyleName::Title => "TitleStyle",
            StyleName::SectionTitle => "SectionTitleStyle",
            StyleName::ItemTitle => "ItemTitleStyle",
            StyleName::ItemSubtitle => "ItemSubtitleStyle",
            StyleName::Body => "BodyStyle",
            StyleName::Contact => "ContactStyle",
            StyleName::Date => "DateStyle",
        }
    }
}

impl std::fmt::Display for StyleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paragraph of inline markup with a named style.
///
/// The markup may contain `<b>`, `<i>`, `<u>`, `<br/>` and `<a>` tags; all
/// other special characters are entity-escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledParagraph {
    /// Escaped inline markup
    pub markup: String,

    /// Paragraph style
    pub style: StyleName,
}

/// One entry of the sequential output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A styled paragraph
    Paragraph(StyledParagraph),

    /// Vertical space in millimetres
    Spacer {
        /// Height in millimetres
        height_mm: f32,
    },
}

impl Element {
    /// Create a paragraph element.
    pub fn paragraph(markup: impl Into<String>, style: StyleName) -> Self {
        Element::Paragraph(StyledParagraph {
            markup: markup.into(),
            style,
        })
    }

    /// Create a spacer element.
    pub fn spacer(height_mm: f32) -> Self {
        Element::Spacer { height_mm }
    }

    /// Check if this is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Element::Spacer { .. })
    }

    /// Get the paragraph style, if this is a paragraph.
    pub fn style(&self) -> Option<StyleName> {
        match self {
            Element::Paragraph(p) => Some(p.style),
            Element::Spacer { .. } => None,
        }
    }

    /// Get the raw markup, if this is a paragraph.
    pub fn markup(&self) -> Option<&str> {
        match self {
            Element::Paragraph(p) => Some(&p.markup),
            Element::Spacer { .. } => None,
        }
    }

    /// Get the visible text with tags removed and entities decoded.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Paragraph(p) => crate::layout::markup::plain_text(&p.markup),
            Element::Spacer { .. } => String::new(),
        }
    }
}
