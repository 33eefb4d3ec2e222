//! Document Export Port - Markdown to PDF/DOCX conversion.
//!
//! The exporter turns a stored Markdown plan into one of two structurally
//! different encodings: a paginated flowable-text document (PDF) or a
//! heading/paragraph object tree (DOCX). Raw Markdown passthrough is handled
//! by the http adapter and needs no conversion here.
//!
//! Rendering backends are optional build capabilities; a build without them
//! reports [`ExportError::Unavailable`] instead of failing the process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for exporting Markdown plans to binary document formats.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Render to a paginated PDF.
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Render to a DOCX heading/paragraph tree.
    async fn to_docx(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Whether the rendering capability for `format` is present.
    fn capability(&self, format: ExportFormat) -> Capability;
}

/// Presence of an optional runtime capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Fully functional.
    Available,
    /// Operating with reduced fidelity (e.g. existence checks only).
    Degraded,
    /// Not compiled into this build.
    Unavailable,
}

/// Export formats addressable by generation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Raw Markdown (no conversion).
    Markdown,
    /// Paginated flow document.
    Pdf,
    /// Heading/paragraph object document.
    Docx,
}

impl ExportFormat {
    /// MIME content type for HTTP delivery.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// File extension for download filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Docx => write!(f, "docx"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "word" => Ok(ExportFormat::Docx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unknown export format requested.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The rendering capability is absent in this build.
    #[error("export unavailable: {0}")]
    Unavailable(String),

    /// The renderer itself failed.
    #[error("document rendering failed: {0}")]
    RenderFailed(String),
}

impl ExportError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn render_failed(reason: impl Into<String>) -> Self {
        Self::RenderFailed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_content_types_are_correct() {
        assert_eq!(
            ExportFormat::Markdown.content_type(),
            "text/markdown; charset=utf-8"
        );
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(
            ExportFormat::Docx.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[test]
    fn export_format_extensions_are_correct() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
        assert_eq!(ExportFormat::Docx.extension(), "docx");
    }

    #[test]
    fn export_format_parses_from_string() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn export_format_parse_rejects_unknown_format() {
        let result = "odt".parse::<ExportFormat>();
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
    }

    #[test]
    fn document_exporter_is_object_safe() {
        fn check<T: DocumentExporter + ?Sized>() {}
        check::<dyn DocumentExporter>();
    }
}
