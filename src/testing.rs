//! Fixtures shared by unit tests.

use serde_json::Value;

/// The bundled style configuration.
pub fn style_config() -> Value {
    serde_json::from_str(include_str!("../config/styles.json")).unwrap()
}

/// The bundled translations.
pub fn translations() -> crate::model::Translations {
    let value = serde_json::from_str(include_str!("../config/translations.json")).unwrap();
    crate::model::Translations::from_value(value).unwrap()
}

/// The bundled CV data.
pub fn cv_document() -> crate::model::CvDocument {
    crate::model::CvDocument::from_json_str(include_str!("../data/cv_data.json")).unwrap()
}
