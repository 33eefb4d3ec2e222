//! Flow-document renderer: Markdown to paginated PDF.
//!
//! Lays out styled paragraphs and spacers sequentially on US-letter pages
//! with builtin Helvetica fonts, breaking to a new page when the vertical
//! cursor runs out. Wrapping is whitespace-based with a per-style column
//! budget; builtin fonts expose no metrics, so the budget is approximate.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::grammar::{classify_document, Line};
use crate::ports::ExportError;

// printpdf measures in Mm(f32); keep all page geometry in f32.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 20.0;

/// Style applied to one classified line.
struct TextStyle {
    size: f32,
    bold: bool,
    /// Vertical advance per rendered line, in mm.
    line_height: f32,
    /// Extra space after the paragraph, in mm.
    space_after: f32,
    /// Approximate characters per wrapped line.
    columns: usize,
}

const HEADING1: TextStyle = TextStyle {
    size: 18.0,
    bold: true,
    line_height: 9.0,
    space_after: 5.0,
    columns: 58,
};
const HEADING2: TextStyle = TextStyle {
    size: 14.0,
    bold: true,
    line_height: 7.5,
    space_after: 4.0,
    columns: 74,
};
const HEADING3: TextStyle = TextStyle {
    size: 12.0,
    bold: true,
    line_height: 6.5,
    space_after: 3.0,
    columns: 86,
};
const BODY: TextStyle = TextStyle {
    size: 11.0,
    bold: false,
    line_height: 5.5,
    space_after: 0.0,
    columns: 94,
};
const SPACER: f32 = 4.0;

/// Render a Markdown plan as PDF bytes.
pub fn render(markdown: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new("Test Plan", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::render_failed(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::render_failed(e.to_string()))?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        cursor: PAGE_HEIGHT - MARGIN,
        regular,
        bold,
    };

    for line in classify_document(markdown) {
        match line {
            Line::Heading1(text) => writer.paragraph(text, &HEADING1),
            Line::Heading2(text) => writer.paragraph(text, &HEADING2),
            Line::Heading3(text) => writer.paragraph(text, &HEADING3),
            Line::Bullet(text) => writer.bullet(text),
            Line::Blank => writer.spacer(SPACER),
            Line::Body(text) => writer.paragraph(text, &BODY),
        }
    }

    let mut bytes = Vec::new();
    {
        let mut buf = std::io::BufWriter::new(&mut bytes);
        doc.save(&mut buf)
            .map_err(|e| ExportError::render_failed(e.to_string()))?;
    }
    Ok(bytes)
}

struct PageWriter<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn paragraph(&mut self, text: &str, style: &TextStyle) {
        for wrapped in wrap(text, style.columns) {
            self.line(&wrapped, style);
        }
        self.cursor -= style.space_after;
    }

    fn bullet(&mut self, text: &str) {
        let mut first = true;
        for wrapped in wrap(text, BODY.columns - 3) {
            let rendered = if first {
                format!("\u{2022} {wrapped}")
            } else {
                format!("   {wrapped}")
            };
            self.line(&rendered, &BODY);
            first = false;
        }
    }

    fn spacer(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn line(&mut self, text: &str, style: &TextStyle) {
        if self.cursor - style.line_height < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }

        self.cursor -= style.line_height;
        let font = if style.bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, style.size, Mm(MARGIN), Mm(self.cursor), font);
    }
}

/// Whitespace wrap into lines of at most `columns` characters.
///
/// Words longer than the budget land on their own line unbroken; an
/// approximate overflow beats splitting inside a word.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
