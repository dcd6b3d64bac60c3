//! Paginated PDF export.
//!
//! Coordinates in [`PageLayout`] are millimetres from the top-left corner of an
//! A4 page, which is how the layout reads; PDF itself measures from the bottom.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::{ExportError, REPORT_TITLE};
use crate::models::SectionLabel;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const TITLE_FONT_SIZE: f32 = 20.0;
pub const BODY_FONT_SIZE: f32 = 12.0;

pub const LEFT_MARGIN_MM: f32 = 10.0;
pub const TOP_MARGIN_MM: f32 = 10.0;
/// Space between the title baseline and the first section.
pub const TITLE_SPACING_MM: f32 = 10.0;
pub const LINE_HEIGHT_MM: f32 = 7.0;
/// A section is moved to a new page once the cursor passes this offset.
pub const PAGE_BREAK_MM: f32 = 280.0;

const LAYER_NAME: &str = "Layer 1";
const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Title,
    Section,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub kind: TextKind,
    pub text: String,
    pub font_size: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PlacedText>,
}

/// Where every line of the exported document goes.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub pages: Vec<Page>,
}

impl PageLayout {
    /// Lay out a centered title followed by one left-aligned line per section.
    pub fn for_outline(sections: &[SectionLabel]) -> Self {
        let mut pages = vec![Page::default()];
        let mut y = TOP_MARGIN_MM;

        pages[0].items.push(PlacedText {
            kind: TextKind::Title,
            text: REPORT_TITLE.to_string(),
            font_size: TITLE_FONT_SIZE,
            x_mm: centered_x(REPORT_TITLE, TITLE_FONT_SIZE),
            y_mm: y,
        });
        y += TITLE_SPACING_MM;

        for section in sections {
            if y > PAGE_BREAK_MM {
                pages.push(Page::default());
                y = TOP_MARGIN_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.items.push(PlacedText {
                    kind: TextKind::Section,
                    text: section.to_string(),
                    font_size: BODY_FONT_SIZE,
                    x_mm: LEFT_MARGIN_MM,
                    y_mm: y,
                });
            }
            y += LINE_HEIGHT_MM;
        }

        Self { pages }
    }

    /// Section lines across all pages, in document order.
    pub fn sections(&self) -> impl Iterator<Item = &PlacedText> {
        self.pages
            .iter()
            .flat_map(|page| page.items.iter())
            .filter(|item| item.kind == TextKind::Section)
    }
}

/// Left edge that centers `text` on the page, using an average glyph width.
fn centered_x(text: &str, font_size: f32) -> f32 {
    let width = text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH * PT_TO_MM;
    ((PAGE_WIDTH_MM - width) / 2.0).max(0.0)
}

/// Draw the layout with the builtin Helvetica font.
pub fn render(layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut pages = layout.pages.iter();
    if let Some(page) = pages.next() {
        draw_page(&doc.get_page(first_page).get_layer(first_layer), page, &font);
    }
    for page in pages {
        let (page_index, layer_index) =
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        draw_page(&doc.get_page(page_index).get_layer(layer_index), page, &font);
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_page(layer: &PdfLayerReference, page: &Page, font: &IndirectFontRef) {
    for item in &page.items {
        layer.use_text(
            item.text.clone(),
            item.font_size,
            Mm(item.x_mm),
            Mm(PAGE_HEIGHT_MM - item.y_mm),
            font,
        );
    }
}
