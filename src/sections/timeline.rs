//! Timeline sections: a title, a subtitle, a date range and bullets.

use serde_json::Value;

use super::{push_bold, push_bullets, push_italic, FormatContext, SectionFormatter};
use crate::error::Result;
use crate::model::{Element, StyleName};

/// Shared layout of timeline items.
///
/// Emits, in order and each only when non-empty: the bold title, the bold
/// subtitle, the italic date range, one bullet per description, and a
/// `small_bottom` spacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineFormatter {
    section_type: &'static str,
    title_field: &'static str,
    subtitle_field: &'static str,
}

impl TimelineFormatter {
    pub const fn new(
        section_type: &'static str,
        title_field: &'static str,
        subtitle_field: &'static str,
    ) -> Self {
        Self {
            section_type,
            title_field,
            subtitle_field,
        }
    }
}

impl SectionFormatter for TimelineFormatter {
    fn section_type(&self) -> &str {
        self.section_type
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let mut elements = Vec::new();

        push_bold(&mut elements, &ctx.field(item, self.title_field), StyleName::ItemTitle);
        push_bold(
            &mut elements,
            &ctx.field(item, self.subtitle_field),
            StyleName::ItemSubtitle,
        );
        push_italic(&mut elements, &ctx.period(item), StyleName::Date);
        push_bullets(&mut elements, &ctx.list(item, "description"));
        elements.push(ctx.spacer("small_bottom")?);

        Ok(elements)
    }
}

/// Work experience: `position`, `company`, period, `description` bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceFormatter;

impl ExperienceFormatter {
    const LAYOUT: TimelineFormatter = TimelineFormatter::new("experience", "position", "company");
}

impl SectionFormatter for ExperienceFormatter {
    fn section_type(&self) -> &str {
        Self::LAYOUT.section_type
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        Self::LAYOUT.format_section_item(item, ctx)
    }
}

/// Education: `degree`, `institution`, period, optional `description` bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EducationFormatter;

impl EducationFormatter {
    const LAYOUT: TimelineFormatter = TimelineFormatter::new("education", "degree", "institution");
}

impl SectionFormatter for EducationFormatter {
    fn section_type(&self) -> &str {
        Self::LAYOUT.section_type
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        Self::LAYOUT.format_section_item(item, ctx)
    }
}
