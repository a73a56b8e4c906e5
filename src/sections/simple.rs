//! Compact sections rendered as one or two body lines per item.

use serde_json::Value;

use super::{
    push_bullets, push_comma_list, push_composite, push_plain, FormatContext, SectionFormatter,
    DETAIL_SEPARATOR,
};
use crate::error::Result;
use crate::locale::scalar_text;
use crate::model::{Element, StyleName};

/// Core skills: a `category` heading followed by `description` bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreSkillsFormatter;

impl SectionFormatter for CoreSkillsFormatter {
    fn section_type(&self) -> &str {
        "core_skills"
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        push_plain(&mut elements, &ctx.field(item, "category"), StyleName::ItemTitle);
        push_bullets(&mut elements, &ctx.list(item, "description"));
        elements.push(ctx.spacer("minimal_bottom")?);
        Ok(elements)
    }
}

/// Skills: a `category` heading followed by a comma-separated list.
///
/// The list is read from `items`, or from `item` for older data files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillsFormatter;

impl SectionFormatter for SkillsFormatter {
    fn section_type(&self) -> &str {
        "skills"
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        push_plain(&mut elements, &ctx.field(item, "category"), StyleName::ItemTitle);

        let mut skills = ctx.list(item, "items");
        if skills.is_empty() {
            skills = ctx.list(item, "item");
        }
        push_comma_list(&mut elements, &skills);

        elements.push(ctx.spacer("item_bottom")?);
        Ok(elements)
    }
}

/// Languages: `<b>language</b> - proficiency`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguagesFormatter;

impl SectionFormatter for LanguagesFormatter {
    fn section_type(&self) -> &str {
        "languages"
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        push_composite(
            &mut elements,
            &ctx.field(item, "language"),
            &ctx.field(item, "proficiency"),
        );
        Ok(elements)
    }
}

/// Certifications: `<b>name</b> - issuer (year)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificationsFormatter;

impl SectionFormatter for CertificationsFormatter {
    fn section_type(&self) -> &str {
        "certifications"
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let detail = issuer_with_year(&ctx.field(item, "issuer"), &year(item));

        let mut elements = Vec::new();
        push_composite(&mut elements, &ctx.field(item, "name"), &detail);
        Ok(elements)
    }
}

/// Awards: `<b>title</b> - issuer (year) - description`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwardsFormatter;

impl SectionFormatter for AwardsFormatter {
    fn section_type(&self) -> &str {
        "awards"
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        let detail = [
            issuer_with_year(&ctx.field(item, "issuer"), &year(item)),
            ctx.field(item, "description"),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(DETAIL_SEPARATOR);

        let mut elements = Vec::new();
        push_composite(&mut elements, &ctx.field(item, "title"), &detail);
        Ok(elements)
    }
}

fn year(item: &Value) -> String {
    item.get("year").and_then(scalar_text).unwrap_or_default()
}

fn issuer_with_year(issuer: &str, year: &str) -> String {
    match (issuer.is_empty(), year.is_empty()) {
        (false, false) => format!("{} ({})", issuer, year),
        (false, true) => issuer.to_string(),
        (true, false) => year.to_string(),
        (true, true) => String::new(),
    }
}
