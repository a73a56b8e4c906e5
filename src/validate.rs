//! Required-field validation of CV documents.
//!
//! Only presence is checked. Every problem is collected so the caller can
//! report them all at once.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::CvDocument;

/// Validate the fields every render needs.
///
/// Requires `personal_info.name`, `personal_info.email` and a
/// `desired_role` that is either a non-blank string or an object.
pub fn validate_document(doc: &CvDocument) -> Result<()> {
    let errors = collect_errors(doc);
    if errors.is_empty() {
        return Ok(());
    }

    Err(Error::Validation {
        message: format!("Invalid CV data:\n- {}", errors.join("\n- ")),
        errors,
    })
}

fn collect_errors(doc: &CvDocument) -> Vec<String> {
    let mut errors = Vec::new();

    match &doc.personal_info {
        None => errors.push("Missing top-level field: 'personal_info'".to_string()),
        Some(info) => {
            if is_blank(info.name.as_deref()) {
                errors.push("Missing required field: 'personal_info.name'".to_string());
            }
            if is_blank(info.email.as_deref()) {
                errors.push("Missing required field: 'personal_info.email'".to_string());
            }
        }
    }

    match &doc.desired_role {
        None | Some(Value::Null) => {
            errors.push("Missing top-level field: 'desired_role'".to_string())
        }
        Some(Value::Object(_)) => {}
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        Some(Value::String(_)) => {
            errors.push("Field 'desired_role' must not be empty".to_string())
        }
        Some(_) => errors.push("Field 'desired_role' must be a string or an object".to_string()),
    }

    errors
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
