//! Object-document renderer: Markdown to DOCX.
//!
//! Builds a tree of heading/paragraph elements: heading lines map to
//! heading styles, bullets to a list-bullet numbering, body lines to plain
//! paragraphs. A blank source line becomes an empty paragraph, but only
//! once prior content exists.

use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, Start, Style, StyleType,
};

use super::grammar::{classify_document, Line};
use crate::ports::ExportError;

const BULLET_NUMBERING: usize = 1;

/// Render a Markdown plan as DOCX bytes.
pub fn render(markdown: &str) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "Heading 1", 32))
        .add_style(heading_style("Heading2", "Heading 2", 26))
        .add_style(heading_style("Heading3", "Heading 3", 24))
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING).add_level(Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("\u{2022}"),
                LevelJc::new("left"),
            )),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    let mut has_content = false;
    for line in classify_document(markdown) {
        let paragraph = match line {
            Line::Heading1(text) => Some(styled_paragraph(text, "Heading1")),
            Line::Heading2(text) => Some(styled_paragraph(text, "Heading2")),
            Line::Heading3(text) => Some(styled_paragraph(text, "Heading3")),
            Line::Bullet(text) => Some(
                Paragraph::new()
                    .add_run(Run::new().add_text(text))
                    .numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0)),
            ),
            Line::Blank => {
                if has_content {
                    Some(Paragraph::new())
                } else {
                    None
                }
            }
            Line::Body(text) => Some(Paragraph::new().add_run(Run::new().add_text(text))),
        };

        if let Some(paragraph) = paragraph {
            if !matches!(line, Line::Blank) {
                has_content = true;
            }
            docx = docx.add_paragraph(paragraph);
        }
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::render_failed(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn heading_style(id: &str, name: &str, half_point_size: usize) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(name)
        .size(half_point_size)
        .bold()
}

fn styled_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(style_id)
}
