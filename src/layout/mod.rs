//! Page layout on top of `genpdf`.
//!
//! Takes the element stream produced by the document orchestrator and
//! turns it into PDF bytes:
//!
//! 1. [`markup`] parses inline tags and entities
//! 2. each paragraph becomes a `genpdf` paragraph styled from the
//!    [`StyleSheet`], and `genpdf` breaks lines and pages
//! 3. [`pdf`] rewrites the document information with `lopdf`

mod blocks;
mod fonts;
pub mod markup;
pub mod pdf;

pub use pdf::DocumentInfo;

use genpdf::elements::{LinearLayout, PaddedElement, Paragraph};
use genpdf::fonts::{Font, FontFamily as FamilyHandle};
use genpdf::style::Style;
use genpdf::Element as _;

use self::blocks::{KeepWithNext, Spacer};
use self::markup::{Inline, InlineStyle};
use crate::error::{Error, Result};
use crate::model::Element;
use crate::style::{Alignment, FontFamily, Margins, ParagraphStyle, StyleSheet};

/// Points per millimetre.
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimetres.
pub fn pt_to_mm(pt: f32) -> f64 {
    f64::from(pt / POINTS_PER_MM)
}

// Ascent plus descent of the embedded DejaVu faces, in em.
const LINE_HEIGHT_EM: f32 = 1.164;

// Advance of the widest glyphs in the embedded faces, in em.
const WIDEST_GLYPH_EM: f32 = 1.1;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm).
    pub const A4: PageSize = PageSize {
        width: 595.276,
        height: 841.89,
    };

    /// US Letter (8.5 x 11 in).
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// Look up a page size by name (`a4`, `letter`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" => Some(PageSize::LETTER),
            _ => None,
        }
    }

    fn to_genpdf(self) -> genpdf::Size {
        genpdf::Size::new(pt_to_mm(self.width), pt_to_mm(self.height))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// The content area left inside the margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    width: f32,
    height: f32,
}

impl Frame {
    fn new(page: PageSize, margins: Margins) -> Result<Self> {
        let frame = Self {
            width: page.width - mm_to_pt(margins.left + margins.right),
            height: page.height - mm_to_pt(margins.top + margins.bottom),
        };
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(Error::render("Page margins leave no room for content"));
        }
        Ok(frame)
    }
}

/// Font families registered with the document beyond the default one.
struct Families {
    times: Option<FamilyHandle<Font>>,
    courier: Option<FamilyHandle<Font>>,
}

impl Families {
    /// Register the families the sheet actually uses.
    fn register(doc: &mut genpdf::Document, sheet: &StyleSheet) -> Result<Self> {
        let uses = |family: FontFamily| sheet.iter().any(|style| style.font.family == family);
        let mut families = Families {
            times: None,
            courier: None,
        };
        for family in [FontFamily::Times, FontFamily::Courier] {
            if !uses(family) {
                continue;
            }
            log::debug!("Embedding {} for {:?}", fonts::embedded_name(family), family);
            let handle = Some(doc.add_font_family(fonts::load(family)?));
            match family {
                FontFamily::Times => families.times = handle,
                _ => families.courier = handle,
            }
        }
        Ok(families)
    }

    fn get(&self, family: FontFamily) -> Option<FamilyHandle<Font>> {
        match family {
            FontFamily::Helvetica => None,
            FontFamily::Times => self.times,
            FontFamily::Courier => self.courier,
        }
    }
}

/// Lay out an element stream and serialize it.
///
/// Returns the PDF bytes and the number of pages.
pub fn render_pdf(
    elements: &[Element],
    sheet: &StyleSheet,
    margins: Margins,
    page_size: PageSize,
    info: &DocumentInfo,
    compress: bool,
) -> Result<(Vec<u8>, usize)> {
    let frame = Frame::new(page_size, margins)?;

    let mut doc = genpdf::Document::new(fonts::load(FontFamily::Helvetica)?);
    doc.set_minimal_conformance();
    doc.set_paper_size(page_size.to_genpdf());
    if let Some(title) = info.title.as_deref() {
        doc.set_title(title);
    }
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(genpdf::Margins::trbl(
        f64::from(margins.top),
        f64::from(margins.right),
        f64::from(margins.bottom),
        f64::from(margins.left),
    ));
    doc.set_page_decorator(decorator);

    let families = Families::register(&mut doc, sheet)?;
    let frame_height_mm = pt_to_mm(frame.height);

    for (index, element) in elements.iter().enumerate() {
        match element {
            Element::Spacer { height_mm } => {
                doc.push(Spacer::new(f64::from(*height_mm), frame_height_mm));
            }
            Element::Paragraph(paragraph) => {
                let style = sheet.get(paragraph.style)?;
                let block = paragraph_block(&paragraph.markup, style, &families, frame.width);
                if style.keep_with_next {
                    let next = elements[index + 1..].iter().find(|e| !e.is_spacer());
                    let reserve = keep_reserve(style, next, sheet);
                    doc.push(KeepWithNext::new(block, pt_to_mm(reserve), frame_height_mm));
                } else {
                    doc.push(block);
                }
            }
        }
    }

    let mut raw = Vec::new();
    doc.render(&mut raw)?;
    let (bytes, pages) = pdf::finalize(&raw, info, compress)?;
    log::debug!("Laid out {} elements on {} pages", elements.len(), pages);
    Ok((bytes, pages))
}

/// Space a keep-with-next paragraph needs at the bottom of a page: its
/// own first line plus the first line of the next paragraph.
fn keep_reserve(style: &ParagraphStyle, next: Option<&Element>, sheet: &StyleSheet) -> f32 {
    let own = style.space_before + style.leading + style.space_after;
    let following = next
        .and_then(Element::style)
        .and_then(|name| sheet.get(name).ok())
        .map_or(0.0, |next| next.space_before + next.leading);
    own + following
}

/// Build the `genpdf` element for one paragraph.
///
/// `<br/>` splits the paragraph into one `genpdf` paragraph per line,
/// stacked vertically and padded with the style's spacing and indent.
fn paragraph_block(
    markup: &str,
    style: &ParagraphStyle,
    families: &Families,
    frame_width: f32,
) -> PaddedElement<LinearLayout> {
    let alignment = match style.alignment {
        Alignment::Center => genpdf::Alignment::Center,
        Alignment::Right => genpdf::Alignment::Right,
        Alignment::Left | Alignment::Justify => genpdf::Alignment::Left,
    };
    let max_token = max_token_chars(frame_width - style.left_indent, style.font_size);

    let mut layout = LinearLayout::vertical();
    let mut line = Paragraph::default();
    let mut empty = true;
    for inline in markup::parse(markup) {
        match inline {
            Inline::Text { text, style: inline } => {
                let run_style = run_style(style, &inline, families);
                for piece in split_long_tokens(&text, max_token) {
                    line.push_styled(piece, run_style);
                }
                empty = false;
            }
            Inline::LineBreak => {
                layout.push(finish_line(line, empty, alignment, style, families));
                line = Paragraph::default();
                empty = true;
            }
        }
    }
    layout.push(finish_line(line, empty, alignment, style, families));

    layout.padded(genpdf::Margins::trbl(
        pt_to_mm(style.space_before),
        0.0,
        pt_to_mm(style.space_after),
        pt_to_mm(style.left_indent),
    ))
}

fn finish_line(
    mut line: Paragraph,
    empty: bool,
    alignment: genpdf::Alignment,
    style: &ParagraphStyle,
    families: &Families,
) -> Paragraph {
    // Empty lines keep their height.
    if empty {
        line.push_styled(" ", run_style(style, &InlineStyle::default(), families));
    }
    line.set_alignment(alignment);
    line
}

/// Translate a paragraph style plus inline emphasis into a `genpdf` style.
///
/// Links take their color from the `<a>` tag when it carries one.
fn run_style(style: &ParagraphStyle, inline: &InlineStyle, families: &Families) -> Style {
    let color = inline.color.unwrap_or(style.text_color);
    let mut run = Style::new()
        .with_font_size(font_size(style.font_size))
        .with_line_spacing(f64::from(style.leading / (style.font_size * LINE_HEIGHT_EM)))
        .with_color(genpdf::style::Color::Rgb(color.r, color.g, color.b));
    if let Some(family) = families.get(style.font.family) {
        run = run.with_font_family(family);
    }
    if style.font.bold || inline.bold {
        run = run.bold();
    }
    if style.font.italic || inline.italic {
        run = run.italic();
    }
    run
}

fn font_size(points: f32) -> u8 {
    points.round().clamp(1.0, f32::from(u8::MAX)) as u8
}

/// Longest token, in characters, that always fits on one line.
fn max_token_chars(width: f32, font_size: f32) -> usize {
    ((width / (font_size * WIDEST_GLYPH_EM)).floor() as usize).max(1)
}

/// Split words longer than `max_chars` into separate pieces.
///
/// Line breaking only happens between pieces and at spaces, so an
/// unbreakable token such as a long URL would otherwise overflow.
fn split_long_tokens(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut run = 0;
    for c in text.chars() {
        if c.is_whitespace() {
            run = 0;
        } else {
            if run == max_chars {
                pieces.push(std::mem::take(&mut current));
                run = 0;
            }
            run += 1;
        }
        current.push(c);
    }
    if !current.is_empty() || pieces.is_empty() {
        pieces.push(current);
    }
    pieces
}
