// Document rendering: résumé and cover-letter layout over an abstract drawing sink,
// plus the PDF sink that turns draw commands into bytes.
// Rendering is CPU-bound: handlers call it inside tokio::task::spawn_blocking.

pub mod cover_letter;
pub mod dates;
pub mod flow;
pub mod metrics;
pub mod pdf;
pub mod resume;
pub mod sink;

use thiserror::Error;

use crate::models::cover_letter::CoverLetterContent;
use crate::models::resume::ResumeContent;

pub use cover_letter::render_cover_letter;
pub use flow::PageGeometry;
pub use pdf::{DocumentInfo, PdfSink};
pub use resume::render_resume;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unrecognised date '{value}'")]
    DateParse { value: String },

    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a résumé under `template_key` straight to PDF bytes.
pub fn resume_pdf(
    content: &ResumeContent,
    template_key: &str,
    info: DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut sink = PdfSink::new(PageGeometry::LETTER, info);
    render_resume(content, template_key, &mut sink)?;
    sink.finish()
}

/// Renders a cover letter straight to PDF bytes.
pub fn cover_letter_pdf(
    content: &CoverLetterContent,
    info: DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut sink = PdfSink::new(PageGeometry::LETTER, info);
    render_cover_letter(content, &mut sink)?;
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ProfessionalInfo;
    use chrono::{TimeZone, Utc};

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Resume".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_resume_pdf_is_deterministic_for_fixed_info() {
        let content = ResumeContent {
            professional_info: ProfessionalInfo {
                name: "Ada Lovelace".into(),
                phone: Some("555-0100".into()),
                ..Default::default()
            },
            skills: vec!["Rust".into(), "Postgres".into()],
            ..Default::default()
        };
        let a = resume_pdf(&content, "modern", info()).unwrap();
        let b = resume_pdf(&content, "modern", info()).unwrap();
        assert!(a.starts_with(b"%PDF-"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_resume_pdf_surfaces_date_error() {
        let mut content = ResumeContent::default();
        content.professional_info.name = "Ada".into();
        content.education.push(crate::models::resume::Education {
            start_date: Some("20/20/20".into()),
            ..Default::default()
        });
        assert!(matches!(
            resume_pdf(&content, "corporate", info()),
            Err(RenderError::DateParse { .. })
        ));
    }

    #[test]
    fn test_cover_letter_pdf() {
        let mut content = CoverLetterContent::default();
        content.user_info.name = "Grace".into();
        content.body = "Hello there.".into();
        let bytes = cover_letter_pdf(&content, info()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
