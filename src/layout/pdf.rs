//! Post-processing of rendered PDFs with `lopdf`.
//!
//! The layout engine writes its own information dictionary with the
//! current time, and may attach XMP metadata and a random file
//! identifier. [`finalize`] replaces the dictionary with the CV's
//! metadata and drops the rest, so identical inputs produce identical
//! bytes unless a creation date is given explicitly.

use chrono::{DateTime, Utc};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat};

use crate::error::Result;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

const PRODUCER: &str = concat!("cvpdf ", env!("CARGO_PKG_VERSION"));

/// Rewrite the document information of `raw` and optionally compress it.
///
/// Returns the final bytes and the page count.
pub fn finalize(raw: &[u8], info: &DocumentInfo, compress: bool) -> Result<(Vec<u8>, usize)> {
    let mut doc = Document::load_mem(raw)?;

    let info_id = doc.add_object(info_dictionary(info));
    doc.trailer.set("Info", info_id);
    doc.trailer.remove(b"ID");
    if let Ok(catalog) = doc.catalog_mut() {
        catalog.remove(b"Metadata");
    }
    doc.prune_objects();
    if compress {
        doc.compress();
    }

    let pages = doc.get_pages().len();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok((bytes, pages))
}

fn info_dictionary(info: &DocumentInfo) -> Dictionary {
    let mut dict = dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
    };
    let entries = [
        ("Title", &info.title),
        ("Author", &info.author),
        ("Subject", &info.subject),
    ];
    for (key, value) in entries {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            dict.set(key, text_string(value));
        }
    }
    if let Some(date) = info.creation_date {
        dict.set(
            "CreationDate",
            Object::string_literal(date.format("D:%Y%m%d%H%M%SZ").to_string()),
        );
    }
    dict
}

/// Encode an info string: PDFDocEncoding-compatible text stays literal,
/// anything else becomes UTF-16BE with a byte order mark.
fn text_string(value: &str) -> Object {
    if value.chars().all(|c| (c as u32) < 0x80) {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
