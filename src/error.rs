//! Error types for cvpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cvpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading inputs and rendering a CV.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Style, translation or application configuration is missing required structure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The CV document is missing required fields.
    #[error("{message}")]
    Validation {
        /// Summary message listing every problem.
        message: String,
        /// Individual validation failures.
        errors: Vec<String>,
    },

    /// Failure while assembling elements or running the layout engine.
    #[error("{}", render_message(.section, .item, .message))]
    Render {
        /// Section type being rendered, if any.
        section: Option<String>,
        /// Index of the offending item within the section.
        item: Option<usize>,
        /// Description of the failure.
        message: String,
    },

    /// A required JSON input file does not exist.
    #[error("JSON file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A JSON input file could not be parsed.
    #[error("Invalid JSON file {}: {source}", .path.display())]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The output path is invalid or escapes the output directory.
    #[error("Invalid output path: {0}")]
    OutputPath(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create a render error without section context.
    pub fn render(message: impl Into<String>) -> Self {
        Error::Render {
            section: None,
            item: None,
            message: message.into(),
        }
    }

    /// Attach section and item context to a render error.
    ///
    /// Errors that already carry a section keep their original context;
    /// non-render errors are wrapped.
    pub fn in_section(self, section: &str, item: Option<usize>) -> Self {
        match self {
            Error::Render {
                section: None,
                message,
                ..
            } => Error::Render {
                section: Some(section.to_string()),
                item,
                message,
            },
            err @ Error::Render { .. } => err,
            other => Error::Render {
                section: Some(section.to_string()),
                item,
                message: other.to_string(),
            },
        }
    }

    /// Check whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check whether this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

fn render_message(section: &Option<String>, item: &Option<usize>, message: &str) -> String {
    match (section, item) {
        (Some(section), Some(item)) => {
            format!("Rendering error in section '{}' item {}: {}", section, item, message)
        }
        (Some(section), None) => format!("Rendering error in section '{}': {}", section, message),
        _ => format!("Rendering error: {}", message),
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::render(format!("PDF serialization failed: {}", err)),
        }
    }
}

impl From<genpdf::error::Error> for Error {
    fn from(err: genpdf::error::Error) -> Self {
        Error::render(format!("PDF layout failed: {}", err))
    }
}
