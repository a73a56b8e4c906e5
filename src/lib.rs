//! # cvpdf
//!
//! Bilingual PDF resume generation from structured JSON.
//!
//! A CV document, a style configuration and a translation table go in; a
//! paginated PDF comes out. Every field of the CV may carry per-language
//! variants (`position_en`, `{"pt": .., "en": ..}`), and the renderer picks
//! the requested language with a Portuguese fallback.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvpdf::{config, render};
//!
//! fn main() -> cvpdf::Result<()> {
//!     let doc = config::load_document("data/cv_data.json")?;
//!     let styles = config::load_json_file("config/styles.json")?;
//!     let translations = config::load_translations("config/translations.json")?;
//!
//!     let pdf = render::render(&doc, &styles, &translations, "en")?;
//!     std::fs::write("cv_en.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Localized fields**: suffixed keys or language maps, with fallback
//! - **Configurable sections**: ordering, enablement, custom formatters
//! - **Styled output**: paragraph styles with inheritance, laid out by genpdf
//!   with embedded Unicode fonts
//! - **Parallel rendering**: one PDF per language with Rayon

pub mod config;
pub mod error;
pub mod layout;
pub mod locale;
pub mod model;
pub mod render;
pub mod sections;
pub mod style;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{load_document, load_json_file, load_translations, AppConfig};
pub use error::{Error, Result};
pub use layout::PageSize;
pub use model::{CvDocument, Element, SectionDescriptor, StyleName, Translations};
pub use render::{RenderOptions, RenderResult, RenderStats, Renderer};
pub use sections::{FormatContext, FormatterRegistry, SectionFormatter};
pub use style::StyleResolver;
pub use validate::validate_document;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// A PDF written by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Language the CV was rendered in
    pub language: String,

    /// Where the PDF was written
    pub path: PathBuf,

    /// Render statistics
    pub stats: RenderStats,
}

/// What to generate and where to put it.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Language code; the configured default when `None`
    pub language: Option<String>,

    /// CV data file overriding the configured one
    pub input: Option<PathBuf>,

    /// Output file overriding the derived name
    pub output: Option<PathBuf>,
}

/// Load inputs named by a configuration, render, and write the PDF.
///
/// # Example
///
/// ```no_run
/// use cvpdf::{generate, AppConfig, GenerateRequest, Renderer};
///
/// let config = AppConfig::load("config/config.json").unwrap();
/// let request = GenerateRequest {
///     language: Some("en".to_string()),
///     ..GenerateRequest::default()
/// };
/// let file = generate(&config, &Renderer::default(), &request).unwrap();
/// println!("{} ({} pages)", file.path.display(), file.stats.pages);
/// ```
pub fn generate(config: &AppConfig, renderer: &Renderer, request: &GenerateRequest) -> Result<GeneratedFile> {
    let language = request
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&config.defaults.language)
        .to_lowercase();

    let data_path = match &request.input {
        Some(path) => path.clone(),
        None => config.data_path(&language)?,
    };
    let doc = load_document(&data_path)?;
    let styles = load_json_file(config.styles_path())?;
    let translations = load_translations(config.translations_path(&language)?)?;

    let result = renderer.render_with_stats(&doc, &styles, &translations, &language)?;

    let path = match &request.output {
        Some(path) => path.clone(),
        None => config.default_output_path(&doc, &language)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.bytes)?;
    log::info!("Generated file: {}", path.display());

    Ok(GeneratedFile {
        language,
        path,
        stats: result.stats,
    })
}

/// Generate one PDF per language in parallel.
///
/// An explicit output path in `request` is ignored; each language gets its
/// derived file name.
pub fn generate_languages(
    config: &AppConfig,
    renderer: &Renderer,
    request: &GenerateRequest,
    languages: &[String],
) -> Vec<Result<GeneratedFile>> {
    languages
        .par_iter()
        .map(|language| {
            let request = GenerateRequest {
                language: Some(language.clone()),
                input: request.input.clone(),
                output: None,
            };
            generate(config, renderer, &request)
        })
        .collect()
}

/// Validate every input named by a configuration without rendering.
pub fn validate_inputs(config: &AppConfig, language: &str, input: Option<&Path>) -> Result<()> {
    let data_path = match input {
        Some(path) => path.to_path_buf(),
        None => config.data_path(language)?,
    };
    let doc = load_document(data_path)?;
    StyleResolver::new(&load_json_file(config.styles_path())?)?;
    load_translations(config.translations_path(language)?)?;
    validate_document(&doc)
}
