//! Section ordering and item lookup.

use serde_json::Value;

use crate::model::{CvDocument, DEFAULT_SECTION_ORDER};

/// Where the items of a planned section come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemSource<'a> {
    /// Items listed inside the section descriptor
    Inline(&'a [Value]),
    /// Items stored under the top-level key named after the section type
    TopLevel,
}

/// One section scheduled for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedSection<'a> {
    pub section_type: &'a str,
    pub source: ItemSource<'a>,
}

/// Outcome of looking up a planned section's items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionItems<'a> {
    /// A non-empty item list
    Items(&'a [Value]),
    /// No data, null, or an empty list
    Empty,
    /// Data present but not a list
    NotAList,
}

/// Resolve which sections render, and in what order.
///
/// Disabled descriptors and blank types are dropped, the rest are sorted
/// by `order` keeping input order on ties. A type listed more than once
/// without inline items is kept at its first position only. Documents
/// without a `sections` list use [`DEFAULT_SECTION_ORDER`].
pub fn plan_sections(doc: &CvDocument) -> Vec<PlannedSection<'_>> {
    let Some(descriptors) = &doc.sections else {
        return DEFAULT_SECTION_ORDER
            .iter()
            .map(|&section_type| PlannedSection {
                section_type,
                source: ItemSource::TopLevel,
            })
            .collect();
    };

    let mut enabled: Vec<_> = descriptors
        .iter()
        .filter(|d| d.enabled && !d.section_type.trim().is_empty())
        .collect();
    enabled.sort_by_key(|d| d.order);

    let mut planned: Vec<PlannedSection<'_>> = Vec::with_capacity(enabled.len());
    for descriptor in enabled {
        let section_type = descriptor.section_type.trim();
        let source = match &descriptor.items {
            Some(items) => ItemSource::Inline(items),
            None => ItemSource::TopLevel,
        };

        let duplicate = source == ItemSource::TopLevel
            && planned
                .iter()
                .any(|p| p.section_type == section_type && p.source == ItemSource::TopLevel);
        if duplicate {
            log::debug!("Section '{}' listed more than once; keeping first", section_type);
            continue;
        }

        planned.push(PlannedSection {
            section_type,
            source,
        });
    }

    planned
}

/// Look up the items of a planned section.
pub fn section_items<'a>(doc: &'a CvDocument, section: &PlannedSection<'a>) -> SectionItems<'a> {
    let items = match section.source {
        ItemSource::Inline(items) => items,
        ItemSource::TopLevel => match doc.section_data(section.section_type) {
            None | Some(Value::Null) => return SectionItems::Empty,
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => return SectionItems::NotAList,
        },
    };

    if items.is_empty() {
        SectionItems::Empty
    } else {
        SectionItems::Items(items)
    }
}
