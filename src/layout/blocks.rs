//! Custom `genpdf` elements for vertical space and keep-with-next.

use genpdf::error::Error;
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Context, Element, Mm, RenderResult, Size};

// Slack below the frame height that still counts as the top of a page.
const PAGE_TOP_TOLERANCE_MM: f64 = 0.5;

fn at_page_top(area: &Area<'_>, frame_height: Mm) -> bool {
    area.size().height + Mm::from(PAGE_TOP_TOLERANCE_MM) >= frame_height
}

/// Fixed vertical space, dropped at the top of a page.
pub struct Spacer {
    height: Mm,
    frame_height: Mm,
}

impl Spacer {
    pub fn new(height_mm: f64, frame_height_mm: f64) -> Self {
        Self {
            height: Mm::from(height_mm),
            frame_height: Mm::from(frame_height_mm),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if at_page_top(&area, self.frame_height) {
            Mm::from(0.0)
        } else if self.height > available {
            available
        } else {
            self.height
        };
        Ok(RenderResult {
            size: Size::new(0.0, height),
            has_more: false,
        })
    }
}

/// Moves its content to the next page unless `reserve` fits here.
///
/// `reserve` covers the element's own first line and the first line of
/// the element after it, so a heading never ends a page alone. At the
/// top of a page the content renders regardless.
pub struct KeepWithNext<E> {
    inner: E,
    reserve: Mm,
    frame_height: Mm,
    placed: bool,
}

impl<E: Element> KeepWithNext<E> {
    pub fn new(inner: E, reserve_mm: f64, frame_height_mm: f64) -> Self {
        Self {
            inner,
            reserve: Mm::from(reserve_mm),
            frame_height: Mm::from(frame_height_mm),
            placed: false,
        }
    }
}

impl<E: Element> Element for KeepWithNext<E> {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if !self.placed {
            self.placed = true;
            if area.size().height < self.reserve && !at_page_top(&area, self.frame_height) {
                return Ok(RenderResult {
                    size: Size::new(0.0, 0.0),
                    has_more: true,
                });
            }
        }
        self.inner.render(context, area, style)
    }
}
