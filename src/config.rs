//! Application configuration.
//!
//! The configuration file tells the command-line tool where to find the CV
//! data, styles and translations, where to write PDFs, and how to log.
//!
//! ```json
//! {
//!   "files": {
//!     "data": "../data/cv_data.json",
//!     "styles": "styles.json",
//!     "translations": "translations.json",
//!     "output_dir": "../output"
//!   },
//!   "defaults": {"language": "pt"},
//!   "logging": {"enabled": true, "level": "info"}
//! }
//! ```
//!
//! `data` and `translations` may be replaced by per-language mappings
//! (`data_by_language`, `translations_by_language`). Relative paths are
//! resolved against the directory holding the configuration file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::locale::sanitize_filename_component;
use crate::model::{CvDocument, Translations};
use crate::render::desired_role;

/// Language whose output file name carries no suffix.
const UNSUFFIXED_LANGUAGE: &str = "pt";

const FILENAME_FALLBACK: &str = "CV";

/// Read a JSON file whose top level must be an object.
pub fn load_json_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if !value.is_object() {
        return Err(Error::config(format!(
            "Top-level JSON value must be an object: {}",
            path.display()
        )));
    }

    log::debug!("Loaded {}", path.display());
    Ok(value)
}

/// Load and parse a CV data file.
pub fn load_document(path: impl AsRef<Path>) -> Result<CvDocument> {
    CvDocument::from_value(load_json_file(path)?)
}

/// Load a translations file.
pub fn load_translations(path: impl AsRef<Path>) -> Result<Translations> {
    Translations::from_value(load_json_file(path)?)
}

/// Input and output locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    /// CV data file used for every language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// CV data file per language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_by_language: Option<BTreeMap<String, String>>,

    /// Style configuration file
    #[serde(default)]
    pub styles: String,

    /// Translations file used for every language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<String>,

    /// Translations file per language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations_by_language: Option<BTreeMap<String, String>>,

    /// Directory for generated PDFs
    #[serde(default)]
    pub output_dir: String,
}

/// Defaults applied when the command line leaves a value out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    UNSUFFIXED_LANGUAGE.to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
        }
    }
}

impl LoggingSettings {
    /// Effective log level; disabled logging still reports warnings.
    pub fn level_filter(&self) -> LevelFilter {
        if !self.enabled {
            return LevelFilter::Warn;
        }
        self.level.trim().parse().unwrap_or(LevelFilter::Info)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

/// Parsed application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub files: FileSettings,

    #[serde(default)]
    pub defaults: DefaultSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl AppConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = load_json_file(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_value(value, base_dir)
    }

    /// Build a configuration from a parsed JSON value.
    pub fn from_value(value: Value, base_dir: impl Into<PathBuf>) -> Result<Self> {
        if !value.get("files").is_some_and(Value::is_object) {
            return Err(Error::config("Missing required 'files' section in config"));
        }

        let mut config: AppConfig = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid configuration: {}", e)))?;
        config.base_dir = base_dir.into();
        config.normalize()?;
        Ok(config)
    }

    fn normalize(&mut self) -> Result<()> {
        let files = &mut self.files;

        let mut missing = Vec::new();
        if files.styles.trim().is_empty() {
            missing.push("styles");
        }
        if files.output_dir.trim().is_empty() {
            missing.push("output_dir");
        }
        if is_blank(&files.data) && files.data_by_language.is_none() {
            missing.push("data or data_by_language");
        }
        if is_blank(&files.translations) && files.translations_by_language.is_none() {
            missing.push("translations or translations_by_language");
        }
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "Missing required config keys in 'files': {}",
                missing.join(", ")
            )));
        }

        files.data_by_language = normalize_mapping(files.data_by_language.take(), "data_by_language")?;
        files.translations_by_language = normalize_mapping(
            files.translations_by_language.take(),
            "translations_by_language",
        )?;

        self.defaults.language = self.defaults.language.trim().to_lowercase();
        if self.defaults.language.is_empty() {
            self.defaults.language = default_language();
        }
        Ok(())
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path from the configuration file.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw.trim());
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.base_dir.join(path))
        }
    }

    /// Style configuration file.
    pub fn styles_path(&self) -> PathBuf {
        self.resolve_path(&self.files.styles)
    }

    /// Output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.files.output_dir)
    }

    /// CV data file for a language.
    pub fn data_path(&self, language: &str) -> Result<PathBuf> {
        self.language_path(&self.files.data, &self.files.data_by_language, language, "data")
    }

    /// Translations file for a language.
    pub fn translations_path(&self, language: &str) -> Result<PathBuf> {
        self.language_path(
            &self.files.translations,
            &self.files.translations_by_language,
            language,
            "translations",
        )
    }

    fn language_path(
        &self,
        shared: &Option<String>,
        mapping: &Option<BTreeMap<String, String>>,
        language: &str,
        kind: &str,
    ) -> Result<PathBuf> {
        if let Some(path) = shared.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(self.resolve_path(path));
        }

        mapping
            .as_ref()
            .and_then(|m| m.get(&language.to_lowercase()))
            .map(|path| self.resolve_path(path))
            .ok_or_else(|| {
                Error::config(format!(
                    "No {} file configured for language '{}'",
                    kind, language
                ))
            })
    }

    /// Languages named in the per-language mappings, sorted.
    pub fn mapped_languages(&self) -> Vec<String> {
        let mut languages = BTreeSet::new();
        for mapping in [&self.files.data_by_language, &self.files.translations_by_language]
            .into_iter()
            .flatten()
        {
            languages.extend(mapping.keys().cloned());
        }
        languages.into_iter().collect()
    }

    /// Default output file for a document inside the output directory.
    pub fn default_output_path(&self, doc: &CvDocument, language: &str) -> Result<PathBuf> {
        let file_name = output_file_name(
            doc.name().unwrap_or_default(),
            &desired_role(doc, language),
            language,
        );
        output_path_in(&self.output_dir(), &file_name)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn normalize_mapping(
    mapping: Option<BTreeMap<String, String>>,
    key: &str,
) -> Result<Option<BTreeMap<String, String>>> {
    let Some(mapping) = mapping else {
        return Ok(None);
    };
    if mapping.is_empty() {
        return Err(Error::config(format!("Key '{}' cannot be empty", key)));
    }

    mapping
        .into_iter()
        .map(|(language, path)| {
            if path.trim().is_empty() {
                return Err(Error::config(format!(
                    "Key '{}' has invalid path for language '{}'",
                    key, language
                )));
            }
            Ok((language.trim().to_lowercase(), path))
        })
        .collect::<Result<BTreeMap<_, _>>>()
        .map(Some)
}

/// File name `<Name>_<Role>[_<LANG>].pdf`.
///
/// Both components are sanitized; the language suffix is left out for
/// Portuguese.
pub fn output_file_name(name: &str, role: &str, language: &str) -> String {
    let name = sanitize_filename_component(name, FILENAME_FALLBACK);
    let role = sanitize_filename_component(role, FILENAME_FALLBACK);
    let language = language.trim().to_lowercase();

    if language == UNSUFFIXED_LANGUAGE || language.is_empty() {
        format!("{}_{}.pdf", name, role)
    } else {
        format!(
            "{}_{}_{}.pdf",
            name,
            role,
            sanitize_filename_component(&language, "").to_uppercase()
        )
    }
}

/// Join a file name onto a directory, refusing results outside it.
pub fn output_path_in(output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let dir = normalize_path(output_dir);
    let candidate = normalize_path(&dir.join(file_name));
    if candidate.parent() != Some(dir.as_path()) || candidate.file_name().is_none() {
        return Err(Error::OutputPath(format!(
            "'{}' escapes output directory {}",
            file_name,
            dir.display()
        )));
    }
    Ok(candidate)
}

/// Lexically remove `.` and `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
