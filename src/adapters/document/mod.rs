//! Document export adapter.
//!
//! One line grammar feeds two structurally different renderers: a paginated
//! flow document (PDF) and a heading/paragraph object tree (DOCX). Each
//! renderer is an optional build capability; a build without one reports
//! the export as unavailable instead of failing.

mod grammar;

#[cfg(feature = "export-docx")]
mod docx;
#[cfg(feature = "export-pdf")]
mod pdf;

pub use grammar::{classify, classify_document, Line};

use async_trait::async_trait;

use crate::ports::{Capability, DocumentExporter, ExportError, ExportFormat};

/// Exporter backed by the in-process PDF/DOCX renderers.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExporter for MarkdownExporter {
    #[cfg(feature = "export-pdf")]
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        pdf::render(markdown)
    }

    #[cfg(not(feature = "export-pdf"))]
    async fn to_pdf(&self, _markdown: &str) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::unavailable(
            "PDF rendering is not compiled into this build",
        ))
    }

    #[cfg(feature = "export-docx")]
    async fn to_docx(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        docx::render(markdown)
    }

    #[cfg(not(feature = "export-docx"))]
    async fn to_docx(&self, _markdown: &str) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::unavailable(
            "DOCX rendering is not compiled into this build",
        ))
    }

    fn capability(&self, format: ExportFormat) -> Capability {
        match format {
            ExportFormat::Markdown => Capability::Available,
            ExportFormat::Pdf => {
                if cfg!(feature = "export-pdf") {
                    Capability::Available
                } else {
                    Capability::Unavailable
                }
            }
            ExportFormat::Docx => {
                if cfg!(feature = "export-docx") {
                    Capability::Available
                } else {
                    Capability::Unavailable
                }
            }
        }
    }
}
