//! Rendering options.

use chrono::{DateTime, Utc};

use crate::layout::PageSize;

/// Options for rendering a CV.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Page dimensions
    pub page_size: PageSize,

    /// Compress page content streams
    pub compress: bool,

    /// Document title; defaults to the candidate's name and role
    pub title: Option<String>,

    /// Document author; defaults to the candidate's name
    pub author: Option<String>,

    /// Creation timestamp written to the info dictionary.
    ///
    /// Left unset by default so that identical inputs produce identical
    /// bytes.
    pub creation_date: Option<DateTime<Utc>>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Override the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Stamp the document with a creation date.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            compress: true,
            title: None,
            author: None,
            creation_date: None,
        }
    }
}
