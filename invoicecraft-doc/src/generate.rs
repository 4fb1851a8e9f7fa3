//! # Invoice Generation Pipeline
//!
//! The single top-level operation: parse -> build -> render -> path.
//! `generate_invoice` keeps errors structured (ParseFailed vs RenderFailed);
//! `generate_invoice_message` flattens them to the human-readable strings the
//! tool surface reports.

use crate::builder::InvoiceDocumentBuilder;
use crate::record::InvoiceRecord;
use crate::render::{output_filename, DocumentRenderer};
use crate::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Generate an invoice document from a JSON record string.
///
/// The output lands at `<out_dir>/invoice_<YYYYMMDD_HHMMSS>.pdf` (extension
/// governed by the filename pattern regardless of renderer). No retries: the
/// first failure is returned as-is.
pub fn generate_invoice(
    invoice_data: &str,
    renderer: &dyn DocumentRenderer,
    out_dir: &Path,
) -> Result<PathBuf> {
    let record = InvoiceRecord::from_json(invoice_data)?;
    let document = InvoiceDocumentBuilder::new().build(record);

    let path = out_dir.join(output_filename(Local::now()));
    renderer.render(&document, &path)?;

    info!(
        path = %path.display(),
        total = document.total,
        renderer = renderer.renderer_name(),
        "invoice generated"
    );
    Ok(path)
}

/// Run the pipeline and always produce a result string: success text with the
/// output path, or descriptive failure text. This is the behavior the tool
/// boundary exposes; nothing is retried and nothing escalates.
pub fn generate_invoice_message(
    invoice_data: &str,
    renderer: &dyn DocumentRenderer,
    out_dir: &Path,
) -> String {
    match generate_invoice(invoice_data, renderer, out_dir) {
        Ok(path) => format!("Invoice PDF generated successfully: {}", path.display()),
        Err(e) => {
            error!(error = %e, "invoice generation failed");
            format!("Error generating invoice PDF: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::render::{MemoryRenderer, PdfRenderer};
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str =
        r#"{"items": [{"description": "Design", "quantity": 3, "rate": 50.0}]}"#;

    #[test]
    fn test_generate_invoice_produces_timestamped_pdf() {
        let dir = TempDir::new().unwrap();
        let renderer = PdfRenderer::new();

        let path = generate_invoice(SAMPLE, &renderer, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("invoice_"));
        assert!(name.ends_with(".pdf"));
        // invoice_YYYYMMDD_HHMMSS.pdf
        assert_eq!(name.len(), "invoice_00000000_000000.pdf".len());
        assert!(path.exists());
    }

    #[test]
    fn test_generate_invoice_malformed_input() {
        let dir = TempDir::new().unwrap();
        let renderer = PdfRenderer::new();

        let err = generate_invoice("{not json", &renderer, dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);

        // No file is created on a parse failure.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_message_success() {
        let dir = TempDir::new().unwrap();
        let renderer = MemoryRenderer::new();

        let message = generate_invoice_message(SAMPLE, &renderer, dir.path());
        assert!(message.starts_with("Invoice PDF generated successfully: "));
        assert!(message.contains("invoice_"));
    }

    #[test]
    fn test_message_failure_is_descriptive_text() {
        let dir = TempDir::new().unwrap();
        let renderer = MemoryRenderer::new();

        let message = generate_invoice_message("{not json", &renderer, dir.path());
        assert!(message.starts_with("Error generating invoice PDF: "));
        assert!(message.contains("ParseFailed"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
