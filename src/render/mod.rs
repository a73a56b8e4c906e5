//! Document orchestration.
//!
//! Turns a CV document into the sequential element stream (header,
//! summary, then every enabled section in order) and hands it to the
//! layout engine.
//!
//! ```no_run
//! use cvpdf::model::{CvDocument, Translations};
//! use cvpdf::render;
//!
//! # fn main() -> cvpdf::Result<()> {
//! let doc = CvDocument::from_json_str(&std::fs::read_to_string("data/cv_data.json")?)?;
//! let styles: serde_json::Value =
//!     serde_json::from_str(&std::fs::read_to_string("config/styles.json")?).unwrap();
//! let pdf = render::render(&doc, &styles, &Translations::new(), "en")?;
//! std::fs::write("cv.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

mod header;
mod options;
mod plan;
mod result;

pub use header::{contact_line, desired_role, social_links, summary, CONTACT_SEPARATOR};
pub use options::RenderOptions;
pub use plan::{plan_sections, section_items, ItemSource, PlannedSection, SectionItems};
pub use result::{RenderResult, RenderStats};

use std::time::Instant;

use rayon::prelude::*;
use serde_json::Value;

use crate::error::Result;
use crate::layout::{self, DocumentInfo};
use crate::model::{CvDocument, Element, StyleName, Translations};
use crate::sections::{push_plain, FormatContext, FormatterRegistry};
use crate::style::StyleResolver;
use crate::validate::validate_document;

/// Render a CV to PDF bytes with default options.
pub fn render(
    doc: &CvDocument,
    style_config: &Value,
    translations: &Translations,
    language: &str,
) -> Result<Vec<u8>> {
    Renderer::default().render(doc, style_config, translations, language)
}

/// Render a CV to PDF bytes with statistics.
pub fn render_with_stats(
    doc: &CvDocument,
    style_config: &Value,
    translations: &Translations,
    language: &str,
) -> Result<RenderResult> {
    Renderer::default().render_with_stats(doc, style_config, translations, language)
}

/// Build the element stream without laying it out.
pub fn build_elements(
    doc: &CvDocument,
    style_config: &Value,
    translations: &Translations,
    language: &str,
) -> Result<Vec<Element>> {
    Renderer::default().build_elements(doc, style_config, translations, language)
}

/// Render one CV per language in parallel.
///
/// Results are returned in the order of `languages`; a failure in one
/// language does not affect the others.
pub fn render_languages(
    doc: &CvDocument,
    style_config: &Value,
    translations: &Translations,
    languages: &[&str],
) -> Vec<Result<Vec<u8>>> {
    Renderer::default().render_languages(doc, style_config, translations, languages)
}

/// CV renderer.
///
/// Owns its formatter registry, so renderers with different section
/// formatters can run side by side.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    registry: FormatterRegistry,
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the built-in formatters.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            registry: FormatterRegistry::with_defaults(),
            options,
        }
    }

    /// Replace the formatter registry.
    pub fn with_registry(mut self, registry: FormatterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the formatter registry.
    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    /// Get a mutable reference to the formatter registry.
    pub fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a CV to PDF bytes.
    pub fn render(
        &self,
        doc: &CvDocument,
        style_config: &Value,
        translations: &Translations,
        language: &str,
    ) -> Result<Vec<u8>> {
        Ok(self
            .render_with_stats(doc, style_config, translations, language)?
            .bytes)
    }

    /// Render a CV to PDF bytes with statistics.
    ///
    /// The style configuration is validated before the document, so a
    /// broken configuration is reported even for an invalid CV.
    pub fn render_with_stats(
        &self,
        doc: &CvDocument,
        style_config: &Value,
        translations: &Translations,
        language: &str,
    ) -> Result<RenderResult> {
        let styles = StyleResolver::new(style_config)?;
        validate_document(doc)?;
        self.render_resolved(doc, &styles, translations, language)
    }

    /// Validate inputs and build the element stream.
    pub fn build_elements(
        &self,
        doc: &CvDocument,
        style_config: &Value,
        translations: &Translations,
        language: &str,
    ) -> Result<Vec<Element>> {
        let styles = StyleResolver::new(style_config)?;
        validate_document(doc)?;
        let ctx = FormatContext::new(language, translations, &styles);
        let (elements, _) = self.assemble(doc, &ctx)?;
        Ok(elements)
    }

    /// Render one CV per language in parallel.
    pub fn render_languages(
        &self,
        doc: &CvDocument,
        style_config: &Value,
        translations: &Translations,
        languages: &[&str],
    ) -> Vec<Result<Vec<u8>>> {
        languages
            .par_iter()
            .map(|language| self.render(doc, style_config, translations, language))
            .collect()
    }

    /// Render with an already resolved style; the document must be valid.
    fn render_resolved(
        &self,
        doc: &CvDocument,
        styles: &StyleResolver,
        translations: &Translations,
        language: &str,
    ) -> Result<RenderResult> {
        let started = Instant::now();
        log::info!("Rendering CV in '{}'", language);

        let ctx = FormatContext::new(language, translations, styles);
        let (elements, mut stats) = self.assemble(doc, &ctx)?;

        let info = self.document_info(doc, language);
        let (bytes, pages) = layout::render_pdf(
            &elements,
            styles.stylesheet(),
            styles.margins()?,
            self.options.page_size,
            &info,
            self.options.compress,
        )?;
        stats.pages = pages;

        log::info!(
            "Rendered CV in '{}': {} pages, {} bytes in {} ms",
            language,
            pages,
            bytes.len(),
            started.elapsed().as_millis()
        );
        Ok(RenderResult::new(bytes, stats))
    }

    fn assemble(&self, doc: &CvDocument, ctx: &FormatContext<'_>) -> Result<(Vec<Element>, RenderStats)> {
        let mut elements = Vec::new();
        let mut stats = RenderStats::new();

        header::push_header(&mut elements, doc, ctx)?;
        header::push_summary(&mut elements, doc, ctx)?;

        for section in plan_sections(doc) {
            if self.push_section(&mut elements, doc, &section, ctx, &mut stats)? {
                stats.sections_rendered += 1;
            } else {
                stats.sections_skipped += 1;
            }
        }

        stats.elements = elements.len();
        Ok((elements, stats))
    }

    /// Emit one section; returns `false` when it was skipped.
    fn push_section(
        &self,
        elements: &mut Vec<Element>,
        doc: &CvDocument,
        section: &PlannedSection<'_>,
        ctx: &FormatContext<'_>,
        stats: &mut RenderStats,
    ) -> Result<bool> {
        let section_type = section.section_type;

        let items = match section_items(doc, section) {
            SectionItems::Items(items) => items,
            SectionItems::Empty => {
                log::debug!("Section '{}' has no items; skipping", section_type);
                return Ok(false);
            }
            SectionItems::NotAList => {
                log::warn!("Section '{}' data is not a list; skipping section", section_type);
                return Ok(false);
            }
        };

        let Some(formatter) = self.registry.get_formatter(section_type) else {
            log::warn!("Unknown section type '{}'; skipping section", section_type);
            return Ok(false);
        };

        let started = Instant::now();
        log::debug!("Rendering section '{}' ({} items)", section_type, items.len());

        let title = ctx.translations.section_title(ctx.language, section_type);
        push_plain(elements, &title, StyleName::SectionTitle);

        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                log::warn!(
                    "Skipping item {} of section '{}': expected an object",
                    index,
                    section_type
                );
                continue;
            }
            let formatted = formatter
                .format_section_item(item, ctx)
                .map_err(|e| e.in_section(section_type, Some(index)))?;
            elements.extend(formatted);
            stats.items_rendered += 1;
        }

        elements.push(
            ctx.spacer("section_bottom")
                .map_err(|e| e.in_section(section_type, None))?,
        );

        log::debug!(
            "Finished section '{}' in {} ms",
            section_type,
            started.elapsed().as_millis()
        );
        Ok(true)
    }

    fn document_info(&self, doc: &CvDocument, language: &str) -> DocumentInfo {
        let name = doc.name().map(str::to_string);
        let role = Some(desired_role(doc, language)).filter(|role| !role.is_empty());

        let title = self.options.title.clone().or_else(|| match (&name, &role) {
            (Some(name), Some(role)) => Some(format!("{} - {}", name, role)),
            (Some(name), None) => Some(name.clone()),
            (None, role) => role.clone(),
        });

        DocumentInfo {
            title,
            author: self.options.author.clone().or(name),
            subject: role,
            creation_date: self.options.creation_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing;
    use serde_json::json;

    fn minimal_doc(extra: Value) -> CvDocument {
        let mut value = json!({
            "personal_info": {"name": "Ana", "email": "ana@example.com"},
            "desired_role": {"desired_role_en": "Engineer"}
        });
        if let (Some(target), Value::Object(extra)) = (value.as_object_mut(), extra) {
            target.extend(extra);
        }
        CvDocument::from_value(value).unwrap()
    }

    fn texts(elements: &[Element]) -> Vec<String> {
        elements
            .iter()
            .filter(|e| !e.is_spacer())
            .map(Element::plain_text)
            .collect()
    }

    #[test]
    fn test_build_elements_order() {
        let doc = minimal_doc(json!({
            "sections": [
                {"type": "languages", "order": 2},
                {"type": "skills", "order": 1}
            ],
            "languages": [{"language": "English", "proficiency": "Fluent"}],
            "skills": [{"category": "Tools", "items": ["git"]}]
        }));
        let elements =
            build_elements(&doc, &testing::style_config(), &Translations::new(), "en").unwrap();

        assert_eq!(
            texts(&elements),
            vec!["Ana", "Engineer", "ana@example.com", "skills", "Tools", "git", "languages", "English - Fluent"]
        );
        assert!(elements.last().unwrap().is_spacer());
    }

    #[test]
    fn test_bundled_cv_renders_every_section() {
        let result = render_with_stats(
            &testing::cv_document(),
            &testing::style_config(),
            &testing::translations(),
            "en",
        )
        .unwrap();
        assert_eq!(result.stats.sections_rendered, 7);
        assert_eq!(result.stats.sections_skipped, 0);
        assert_eq!(result.stats.items_rendered, 16);
        assert!(result.stats.pages >= 1);
    }

    #[test]
    fn test_empty_and_unknown_sections_skipped() {
        let doc = minimal_doc(json!({
            "sections": [
                {"type": "hobbies", "items": [{"name": "chess"}]},
                {"type": "awards"},
                {"type": "skills", "items": [{"category": "Cloud"}]}
            ],
            "awards": []
        }));
        let result =
            render_with_stats(&doc, &testing::style_config(), &Translations::new(), "en").unwrap();
        assert_eq!(result.stats.sections_rendered, 1);
        assert_eq!(result.stats.sections_skipped, 2);
        assert_eq!(result.stats.items_rendered, 1);
        assert_eq!(result.stats.pages, 1);
        assert!(result.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_non_object_items_skipped() {
        let doc = minimal_doc(json!({
            "sections": [{"type": "languages"}],
            "languages": ["English", {"language": "Spanish"}]
        }));
        let elements =
            build_elements(&doc, &testing::style_config(), &Translations::new(), "en").unwrap();
        assert!(texts(&elements).contains(&"Spanish".to_string()));
        assert!(!texts(&elements).contains(&"English".to_string()));
    }

    #[test]
    fn test_style_validated_before_document() {
        let doc = CvDocument::default();
        let err = render(&doc, &json!({}), &Translations::new(), "en").unwrap_err();
        assert!(err.is_config());

        let err = render(&doc, &testing::style_config(), &Translations::new(), "en").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_document_info_defaults_and_overrides() {
        let doc = minimal_doc(json!({}));
        let info = Renderer::default().document_info(&doc, "en");
        assert_eq!(info.title.as_deref(), Some("Ana - Engineer"));
        assert_eq!(info.author.as_deref(), Some("Ana"));
        assert_eq!(info.subject.as_deref(), Some("Engineer"));

        let renderer = Renderer::new(RenderOptions::new().with_title("Resume").with_author("A. S."));
        let info = renderer.document_info(&doc, "en");
        assert_eq!(info.title.as_deref(), Some("Resume"));
        assert_eq!(info.author.as_deref(), Some("A. S."));
    }

    #[test]
    fn test_render_languages_keeps_order() {
        let doc = minimal_doc(json!({"summary": {"description_pt": "Olá", "description_en": "Hello"}}));
        let results = render_languages(
            &doc,
            &testing::style_config(),
            &Translations::new(),
            &["pt", "en", "es"],
        );
        assert_eq!(results.len(), 3);
        for (result, language) in results.iter().zip(["pt", "en", "es"]) {
            let expected = render(&doc, &testing::style_config(), &Translations::new(), language).unwrap();
            assert_eq!(result.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_render_languages_reports_invalid_input_for_each_language() {
        let results = render_languages(
            &CvDocument::default(),
            &testing::style_config(),
            &Translations::new(),
            &["pt", "en"],
        );
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(Error::Validation { .. })));
        assert!(results[1].is_err());
    }
}
