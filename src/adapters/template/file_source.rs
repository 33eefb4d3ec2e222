//! File-system template source.
//!
//! Classifies template files by extension, validates readability/size, and
//! extracts plain text. PDF page parsing is an optional build capability
//! (`template-pdf`); without it, PDF validation degrades to an existence
//! check and text extraction yields a placeholder rather than failing.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::TemplateFormat;
use crate::ports::{Capability, TemplateDetail, TemplateReport, TemplateSource};

/// Templates shorter than this are flagged as a warning, not a failure.
const MIN_TEMPLATE_CHARS: usize = 10;

#[cfg(not(feature = "template-pdf"))]
const PDF_PLACEHOLDER: &str = "[PDF template - text extraction not available in this build]";

/// Template source reading from the local file system.
#[derive(Debug, Clone, Default)]
pub struct FileTemplateSource;

impl FileTemplateSource {
    pub fn new() -> Self {
        Self
    }

    /// Presence of the PDF page-parsing capability in this build.
    pub fn pdf_capability() -> Capability {
        if cfg!(feature = "template-pdf") {
            Capability::Available
        } else {
            Capability::Degraded
        }
    }

    async fn validate_text(&self, path: &str, format: TemplateFormat) -> TemplateReport {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                return TemplateReport::failed("Error reading template", e.to_string());
            }
        };

        let size = content.chars().count();
        if size < MIN_TEMPLATE_CHARS {
            TemplateReport::warning(
                format,
                format!("Template is very small (under {MIN_TEMPLATE_CHARS} characters)"),
                TemplateDetail::Size { size },
            )
        } else {
            TemplateReport::valid(
                format,
                format!("Template valid ({size} characters)"),
                TemplateDetail::Size { size },
            )
        }
    }

    #[cfg(feature = "template-pdf")]
    async fn validate_pdf(&self, path: &str) -> TemplateReport {
        let path = path.to_string();
        let pages = tokio::task::spawn_blocking(move || {
            lopdf::Document::load(&path).map(|doc| doc.get_pages().len())
        })
        .await;

        match pages {
            Ok(Ok(pages)) => TemplateReport::valid(
                TemplateFormat::Pdf,
                format!("PDF template valid ({pages} pages)"),
                TemplateDetail::Pages { pages },
            ),
            Ok(Err(e)) => TemplateReport::failed("PDF validation error", e.to_string()),
            Err(e) => TemplateReport::failed("PDF validation error", e.to_string()),
        }
    }

    #[cfg(not(feature = "template-pdf"))]
    async fn validate_pdf(&self, _path: &str) -> TemplateReport {
        // Degraded mode: the file exists, content unverified.
        TemplateReport::valid(
            TemplateFormat::Pdf,
            "PDF file exists (content unverified)",
            TemplateDetail::Unverified,
        )
    }

    #[cfg(feature = "template-pdf")]
    async fn load_pdf_text(&self, path: &str) -> Option<String> {
        let path = path.to_string();
        let result =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path)).await;

        match result {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "PDF text extraction failed");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "PDF extraction task failed");
                None
            }
        }
    }

    #[cfg(not(feature = "template-pdf"))]
    async fn load_pdf_text(&self, _path: &str) -> Option<String> {
        Some(PDF_PLACEHOLDER.to_string())
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn validate(&self, path: &str) -> TemplateReport {
        // Missing files fail before any format-specific logic.
        if !Path::new(path).exists() {
            return TemplateReport::failed(
                format!("Template file '{path}' not found"),
                "file not found",
            );
        }

        match TemplateFormat::from_path(path) {
            Some(TemplateFormat::Pdf) => self.validate_pdf(path).await,
            Some(format) => self.validate_text(path, format).await,
            None => TemplateReport::failed(
                "Only PDF, Markdown (.md), and text (.txt) templates are supported",
                "unsupported format",
            ),
        }
    }

    async fn load_text(&self, path: &str) -> Option<String> {
        match TemplateFormat::from_path(path) {
            Some(TemplateFormat::Pdf) => self.load_pdf_text(path).await,
            Some(_) => match tokio::fs::read_to_string(path).await {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::error!(error = %e, path, "template read failed");
                    None
                }
            },
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationStatus;
    use std::io::Write;

    fn write_template(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn missing_file_fails_with_not_found_regardless_of_extension() {
        let source = FileTemplateSource::new();
        for path in ["/nonexistent/plan.md", "/nonexistent/plan.pdf", "/nonexistent/plan.xyz"] {
            let report = source.validate(path).await;
            assert_eq!(report.status, ValidationStatus::Failed);
            assert_eq!(report.error.as_deref(), Some("file not found"));
            // The human-readable summary carries the indication too.
            assert!(report.message.contains("not found"));
        }
    }

    #[tokio::test]
    async fn unsupported_extension_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, "plan.docx", "irrelevant content here");

        let report = FileTemplateSource::new().validate(&path).await;
        assert_eq!(report.status, ValidationStatus::Failed);
        assert_eq!(report.error.as_deref(), Some("unsupported format"));
    }

    #[tokio::test]
    async fn nine_characters_warns_ten_validates() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTemplateSource::new();

        let short = write_template(&dir, "short.md", "123456789");
        let report = source.validate(&short).await;
        assert_eq!(report.status, ValidationStatus::Warning);
        assert_eq!(report.detail, TemplateDetail::Size { size: 9 });

        let exact = write_template(&dir, "exact.md", "1234567890");
        let report = source.validate(&exact).await;
        assert_eq!(report.status, ValidationStatus::Valid);
        assert_eq!(report.detail, TemplateDetail::Size { size: 10 });
    }

    #[tokio::test]
    async fn size_is_counted_in_characters_not_bytes() {
        let dir = tempfile::tempdir().unwrap();
        // Nine characters, more than nine bytes.
        let path = write_template(&dir, "unicode.txt", "ééééééééé");

        let report = FileTemplateSource::new().validate(&path).await;
        assert_eq!(report.status, ValidationStatus::Warning);
        assert_eq!(report.detail, TemplateDetail::Size { size: 9 });
    }

    #[tokio::test]
    async fn load_text_returns_raw_content_for_text_templates() {
        let dir = tempfile::tempdir().unwrap();
        let content = "# Template\n\n- scenario one\n";
        let path = write_template(&dir, "plan.md", content);

        let loaded = FileTemplateSource::new().load_text(&path).await;
        assert_eq!(loaded.as_deref(), Some(content));
    }

    #[tokio::test]
    async fn load_text_returns_none_for_missing_file() {
        let loaded = FileTemplateSource::new().load_text("/nonexistent/plan.md").await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn load_text_returns_none_for_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, "plan.odt", "whatever");
        assert!(FileTemplateSource::new().load_text(&path).await.is_none());
    }

    #[cfg(feature = "template-pdf")]
    #[tokio::test]
    async fn malformed_pdf_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(&dir, "broken.pdf", "not actually a pdf");

        let report = FileTemplateSource::new().validate(&path).await;
        assert_eq!(report.status, ValidationStatus::Failed);
    }
}
