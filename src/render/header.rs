//! Header and summary blocks.

use serde_json::Value;

use crate::error::Result;
use crate::locale::{self, escape_attribute, escape_preserving_tags, rich_text};
use crate::model::{CvDocument, Element, PersonalInfo, StyleName};
use crate::sections::{push_plain, FormatContext};
use crate::style::Color;

/// Separator between contact items and between social links.
pub const CONTACT_SEPARATOR: &str = " | ";

const DEFAULT_SUMMARY_TITLE: &str = "Summary";

/// Localized desired role; a plain string is used as is.
pub fn desired_role(doc: &CvDocument, language: &str) -> String {
    localized_node(doc.desired_role.as_ref(), "desired_role", language)
}

/// Localized summary text; a plain string is used as is.
pub fn summary(doc: &CvDocument, language: &str) -> String {
    localized_node(doc.summary.as_ref(), "description", language)
}

fn localized_node(node: Option<&Value>, field: &str, language: &str) -> String {
    match node {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(node) => locale::resolve_field(node, field, language, ""),
        None => String::new(),
    }
}

/// Emit name, role, contact line and social links, then the header spacer.
pub fn push_header(elements: &mut Vec<Element>, doc: &CvDocument, ctx: &FormatContext<'_>) -> Result<()> {
    push_plain(elements, doc.name().unwrap_or_default(), StyleName::Name);
    push_plain(elements, &desired_role(doc, ctx.language), StyleName::Title);

    if let Some(info) = &doc.personal_info {
        push_plain(elements, &contact_line(info, ctx.language), StyleName::Contact);

        let links = social_links(info, ctx.styles.social_link_color()?);
        if !links.is_empty() {
            elements.push(Element::paragraph(links, StyleName::Contact));
        }
    }

    elements.push(ctx.spacer("header_bottom")?);
    Ok(())
}

/// Phone, e-mail and location joined by [`CONTACT_SEPARATOR`].
///
/// Phone and location may carry localized variants (`phone_en`).
pub fn contact_line(info: &PersonalInfo, language: &str) -> String {
    let node = info.as_node();
    [
        locale::resolve_field(&node, "phone", language, ""),
        info.email.as_deref().unwrap_or_default().trim().to_string(),
        locale::resolve_field(&node, "location", language, ""),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR)
}

/// Link markup for every social entry with a URL.
pub fn social_links(info: &PersonalInfo, color: Color) -> String {
    info.social
        .iter()
        .filter_map(|link| {
            let url = link.url.trim();
            if url.is_empty() {
                return None;
            }
            let label = match link.label.trim() {
                "" => url,
                label => label,
            };
            Some(format!(
                r#"<a href="{}" color="{}">{}</a>"#,
                escape_attribute(url),
                color.to_hex(),
                escape_preserving_tags(label)
            ))
        })
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// Emit the summary block when the document has a summary.
///
/// Returns whether anything was emitted.
pub fn push_summary(elements: &mut Vec<Element>, doc: &CvDocument, ctx: &FormatContext<'_>) -> Result<bool> {
    let text = summary(doc, ctx.language);
    if text.is_empty() {
        return Ok(false);
    }

    let title = ctx
        .translations
        .get(ctx.language, "sections", "summary")
        .unwrap_or_else(|| DEFAULT_SUMMARY_TITLE.to_string());
    push_plain(elements, &title, StyleName::SectionTitle);
    elements.push(Element::paragraph(rich_text(&text), StyleName::Body));
    elements.push(ctx.spacer("section_bottom")?);
    Ok(true)
}
