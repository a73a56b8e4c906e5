//! Font faces named by style configurations (the PDF base-14 set).

use std::fmt;

/// Font family of a base-14 face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

/// A base-14 text face (Symbol and ZapfDingbats are not supported).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontFace {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl FontFace {
    pub const HELVETICA: FontFace = FontFace::new(FontFamily::Helvetica, false, false);

    pub const fn new(family: FontFamily, bold: bool, italic: bool) -> Self {
        Self {
            family,
            bold,
            italic,
        }
    }

    /// Look up a face by its PostScript name, e.g. `Helvetica-Bold` or
    /// `Times-Roman`. Matching is case-insensitive; `Times` is accepted as
    /// an alias of `Times-Roman`.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let (family, style) = match lower.split_once('-') {
            Some((family, style)) => (family, style),
            None => (lower.as_str(), ""),
        };

        let family = match family {
            "helvetica" | "arial" => FontFamily::Helvetica,
            "times" => FontFamily::Times,
            "courier" => FontFamily::Courier,
            _ => return None,
        };

        let (bold, italic) = match (family, style) {
            (_, "") => (false, false),
            (FontFamily::Times, "roman") => (false, false),
            (_, "bold") => (true, false),
            (FontFamily::Times, "italic") => (false, true),
            (FontFamily::Times, "bolditalic") => (true, true),
            (FontFamily::Helvetica | FontFamily::Courier, "oblique") => (false, true),
            (FontFamily::Helvetica | FontFamily::Courier, "boldoblique") => (true, true),
            _ => return None,
        };

        Some(Self::new(family, bold, italic))
    }

    /// The PostScript name written to the PDF `BaseFont` entry.
    pub fn postscript_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// The face with bold and/or italic added on top of this one.
    pub fn emphasized(&self, bold: bool, italic: bool) -> Self {
        Self::new(self.family, self.bold || bold, self.italic || italic)
    }
}

impl Default for FontFace {
    fn default() -> Self {
        FontFace::HELVETICA
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let face = FontFace::from_name("Helvetica-Bold").unwrap();
        assert_eq!(face, FontFace::new(FontFamily::Helvetica, true, false));
        assert_eq!(FontFace::from_name("times").unwrap().postscript_name(), "Times-Roman");
        assert_eq!(
            FontFace::from_name("Courier-BoldOblique").unwrap().postscript_name(),
            "Courier-BoldOblique"
        );
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert!(FontFace::from_name("Comic Sans").is_none());
        assert!(FontFace::from_name("Helvetica-Italic").is_none());
        assert!(FontFace::from_name("Times-Oblique").is_none());
    }

    #[test]
    fn test_emphasized_keeps_family() {
        let face = FontFace::from_name("Times-Bold").unwrap().emphasized(false, true);
        assert_eq!(face.postscript_name(), "Times-BoldItalic");
        assert_eq!(FontFace::HELVETICA.emphasized(true, false).to_string(), "Helvetica-Bold");
    }

    #[test]
    fn test_names_round_trip() {
        for family in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            for bold in [false, true] {
                for italic in [false, true] {
                    let face = FontFace::new(family, bold, italic);
                    assert_eq!(FontFace::from_name(face.postscript_name()), Some(face));
                }
            }
        }
    }
}
