//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a CV: the PDF bytes plus statistics.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// The rendered PDF
    pub bytes: Vec<u8>,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(bytes: Vec<u8>, stats: RenderStats) -> Self {
        Self { bytes, stats }
    }

    /// Get the PDF length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Statistics collected while assembling and laying out a CV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of pages in the output
    pub pages: usize,

    /// Sections that produced a title and at least one item
    pub sections_rendered: usize,

    /// Items passed to a formatter
    pub items_rendered: usize,

    /// Sections skipped because they were empty, malformed or unknown
    pub sections_skipped: usize,

    /// Elements in the stream handed to the layout engine
    pub elements: usize,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}
