//! Data model types for CV rendering.
//!
//! The input side (`CvDocument`, `Translations`) is produced by a loader and
//! is read-only during a render. The output side (`Element`) is the flat,
//! sequential stream of styled paragraphs and spacers handed to the layout
//! engine.

mod cv;
mod element;
mod translations;

pub use cv::{CvDocument, PersonalInfo, SectionDescriptor, SocialLink, DEFAULT_SECTION_ORDER};
pub use element::{Element, StyleName, StyledParagraph};
pub use translations::Translations;
