//! CV document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Section order used when the document carries no `sections` list.
pub const DEFAULT_SECTION_ORDER: [&str; 7] = [
    "experience",
    "education",
    "core_skills",
    "skills",
    "languages",
    "awards",
    "certifications",
];

const UNORDERED: i64 = 999;

/// Root aggregate of a CV.
///
/// Section item lists either live inline in a [`SectionDescriptor`] or under
/// a top-level key named after the section type (collected in
/// `section_data`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvDocument {
    /// Name, contact details and social links
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,

    /// Desired role, either a plain string or a node with localized
    /// `desired_role_<lang>` keys
    #[serde(default)]
    pub desired_role: Option<Value>,

    /// Summary, either a plain string or a node with a localized `description`
    #[serde(default)]
    pub summary: Option<Value>,

    /// Section ordering and enablement
    #[serde(default)]
    pub sections: Option<Vec<SectionDescriptor>>,

    /// Every other top-level key, e.g. `"experience": [...]`
    #[serde(flatten)]
    pub section_data: Map<String, Value>,
}

impl CvDocument {
    /// Build a document from a parsed JSON value.
    ///
    /// Shape errors (a non-object root, a non-string name, ...) are reported
    /// as validation errors.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(invalid_shape("top-level CV data must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| invalid_shape(&e.to_string()))
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| invalid_shape(&e.to_string()))?;
        Self::from_value(value)
    }

    /// Get the candidate's name, if present.
    pub fn name(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .and_then(|info| info.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Get the item list stored under a top-level key for a section type.
    pub fn section_data(&self, section_type: &str) -> Option<&Value> {
        self.section_data.get(section_type)
    }
}

fn invalid_shape(detail: &str) -> Error {
    let error = format!("Malformed CV data: {}", detail);
    Error::Validation {
        message: format!("Invalid CV data:\n- {}", error),
        errors: vec![error],
    }
}

/// Personal information block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Full name
    #[serde(default)]
    pub name: Option<String>,

    /// Contact e-mail
    #[serde(default)]
    pub email: Option<String>,

    /// Social/profile links
    #[serde(default)]
    pub social: Vec<SocialLink>,

    /// Remaining fields (`phone`, `location`, and their localized variants)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PersonalInfo {
    /// View the localizable fields as a JSON node.
    pub fn as_node(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// A labelled link shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Visible label; the URL is shown when empty
    #[serde(default)]
    pub label: String,

    /// Link target
    #[serde(default)]
    pub url: String,
}

/// Ordering and enablement of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Section type identifier, matched against the formatter registry
    #[serde(rename = "type")]
    pub section_type: String,

    /// Disabled sections are skipped entirely
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Render position; ties keep input order
    #[serde(default = "default_order")]
    pub order: i64,

    /// Inline items; when absent, items come from the top-level key named
    /// after the section type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
}

impl SectionDescriptor {
    /// Create an enabled descriptor with inline items.
    pub fn new(section_type: impl Into<String>, order: i64, items: Vec<Value>) -> Self {
        Self {
            section_type: section_type.into(),
            enabled: true,
            order,
            items: Some(items),
        }
    }

    /// Disable the section.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

fn default_enabled() -> bool {
    true
}

fn default_order() -> i64 {
    UNORDERED
}
