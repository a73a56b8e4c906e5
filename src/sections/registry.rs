//! Lookup of formatters by section type.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AwardsFormatter, CertificationsFormatter, CoreSkillsFormatter, EducationFormatter,
    ExperienceFormatter, LanguagesFormatter, SectionFormatter, SkillsFormatter,
};

/// Registry mapping section type identifiers to formatters.
///
/// Lookups are exact: there is no fallback between section types. A
/// registry is a plain value, so each renderer can own its own.
#[derive(Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Arc<dyn SectionFormatter>>,
}

impl FormatterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Create a registry with the built-in formatters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ExperienceFormatter));
        registry.register(Arc::new(EducationFormatter));
        registry.register(Arc::new(CoreSkillsFormatter));
        registry.register(Arc::new(SkillsFormatter));
        registry.register(Arc::new(LanguagesFormatter));
        registry.register(Arc::new(AwardsFormatter));
        registry.register(Arc::new(CertificationsFormatter));
        registry
    }

    /// Register a formatter under its section type, replacing any previous
    /// formatter for that type.
    pub fn register(&mut self, formatter: Arc<dyn SectionFormatter>) {
        let section_type = formatter.section_type().to_string();
        if self.formatters.insert(section_type.clone(), formatter).is_some() {
            log::debug!("Replaced formatter for section type '{}'", section_type);
        }
    }

    /// Register a formatter under an explicit section type.
    pub fn register_as(&mut self, section_type: impl Into<String>, formatter: Arc<dyn SectionFormatter>) {
        self.formatters.insert(section_type.into(), formatter);
    }

    /// Get the formatter for a section type.
    pub fn get_formatter(&self, section_type: &str) -> Option<Arc<dyn SectionFormatter>> {
        self.formatters.get(section_type).cloned()
    }

    /// Check if a section type is registered.
    pub fn supports(&self, section_type: &str) -> bool {
        self.formatters.contains_key(section_type)
    }

    /// Registered section types, sorted.
    pub fn section_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("section_types", &self.section_types())
            .finish()
    }
}
