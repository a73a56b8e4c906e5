//! Bundled TrueType faces standing in for the base-14 families.
//!
//! Style configurations name PDF base-14 fonts (`Helvetica-Bold`,
//! `Times-Roman`, ...). Those faces only cover Windows-1252, so text is
//! drawn with embedded DejaVu faces of matching design instead: Sans for
//! Helvetica, Serif for Times and Sans Mono for Courier.

use genpdf::fonts::{FontData, FontFamily as FamilyData};

use crate::error::Result;
use crate::style::FontFamily;

struct Faces {
    regular: &'static [u8],
    bold: &'static [u8],
    italic: &'static [u8],
    bold_italic: &'static [u8],
}

const SANS: Faces = Faces {
    regular: include_bytes!("../../assets/fonts/DejaVuSans-Regular.ttf"),
    bold: include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf"),
    italic: include_bytes!("../../assets/fonts/DejaVuSans-Italic.ttf"),
    bold_italic: include_bytes!("../../assets/fonts/DejaVuSans-BoldItalic.ttf"),
};

const SERIF: Faces = Faces {
    regular: include_bytes!("../../assets/fonts/DejaVuSerif-Regular.ttf"),
    bold: include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf"),
    italic: include_bytes!("../../assets/fonts/DejaVuSerif-Italic.ttf"),
    bold_italic: include_bytes!("../../assets/fonts/DejaVuSerif-BoldItalic.ttf"),
};

const MONO: Faces = Faces {
    regular: include_bytes!("../../assets/fonts/DejaVuSansMono-Regular.ttf"),
    bold: include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf"),
    italic: include_bytes!("../../assets/fonts/DejaVuSansMono-Italic.ttf"),
    bold_italic: include_bytes!("../../assets/fonts/DejaVuSansMono-BoldItalic.ttf"),
};

/// Name of the embedded family used for a configured family.
pub fn embedded_name(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Helvetica => "DejaVu Sans",
        FontFamily::Times => "DejaVu Serif",
        FontFamily::Courier => "DejaVu Sans Mono",
    }
}

/// Load the four faces of the embedded family for `family`.
pub fn load(family: FontFamily) -> Result<FamilyData<FontData>> {
    let faces = match family {
        FontFamily::Helvetica => &SANS,
        FontFamily::Times => &SERIF,
        FontFamily::Courier => &MONO,
    };
    Ok(FamilyData {
        regular: FontData::new(faces.regular.to_vec(), None)?,
        bold: FontData::new(faces.bold.to_vec(), None)?,
        italic: FontData::new(faces.italic.to_vec(), None)?,
        bold_italic: FontData::new(faces.bold_italic.to_vec(), None)?,
    })
}
