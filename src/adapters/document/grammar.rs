//! Line-level Markdown grammar shared by both document renderers.
//!
//! Deliberately not a Markdown parser: each line is classified on its own,
//! top to bottom, with no cross-line lookahead. Nested lists and inline
//! emphasis are not interpreted; their characters pass through literally.

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Heading1(&'a str),
    Heading2(&'a str),
    Heading3(&'a str),
    /// `- ` or `* ` item; the payload excludes the marker.
    Bullet(&'a str),
    /// Blank (or whitespace-only) line, rendered as vertical space.
    Blank,
    /// Any other non-empty line.
    Body(&'a str),
}

/// Classify a single line.
pub fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = line.strip_prefix("### ") {
        Line::Heading3(rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        Line::Heading2(rest)
    } else if let Some(rest) = line.strip_prefix("# ") {
        Line::Heading1(rest)
    } else if let Some(rest) = line.strip_prefix("- ") {
        Line::Bullet(rest)
    } else if let Some(rest) = line.strip_prefix("* ") {
        Line::Bullet(rest)
    } else if line.trim().is_empty() {
        Line::Blank
    } else {
        Line::Body(line)
    }
}

/// Classify a whole document in source order.
pub fn classify_document(markdown: &str) -> impl Iterator<Item = Line<'_>> {
    markdown.lines().map(classify)
}
