//! Contract text extraction
//!
//! Converts an uploaded document into a single plain-text string:
//! - PDF: page text concatenated, empty pages skipped
//! - DOCX: body paragraphs joined with newlines
//! - TXT: UTF-8 with undecodable bytes dropped
//!
//! # Example
//! ```no_run
//! use contract_extract::{extract_text, ExtractError};
//! use shared_types::UploadedDocument;
//!
//! fn load(bytes: Vec<u8>) -> Result<(), ExtractError> {
//!     let doc = UploadedDocument::new("lease.pdf", bytes);
//!     match extract_text(&doc)? {
//!         Some(text) => println!("{} characters", text.chars().count()),
//!         None => println!("File is empty or unreadable."),
//!     }
//!     Ok(())
//! }
//! ```

pub mod docx;
pub mod pdf;
pub mod txt;

pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use txt::extract_txt;

use shared_types::{DocumentFormat, UploadedDocument};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading an uploaded document
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract plain text from an uploaded document.
///
/// Returns `Ok(None)` for unsupported formats and for documents that yield
/// no text, `Err` when the file is corrupt.
pub fn extract_text(document: &UploadedDocument) -> Result<Option<String>, ExtractError> {
    let Some(format) = document.format else {
        debug!("Unsupported upload: {}", document.filename);
        return Ok(None);
    };

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(&document.bytes)?,
        DocumentFormat::Docx => extract_docx(&document.bytes)?,
        DocumentFormat::Txt => extract_txt(&document.bytes),
    };

    debug!(
        "Extracted {} characters from {} ({})",
        text.chars().count(),
        document.filename,
        format
    );

    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unsupported_extension_is_not_an_error() {
        let doc = UploadedDocument::new("contract.rtf", b"{\\rtf1 hello}".to_vec());
        let result = extract_text(&doc);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_txt_dispatch() {
        let doc = UploadedDocument::new("NOTES.TXT", b"Payment within 30 days.".to_vec());
        assert_eq!(
            extract_text(&doc).unwrap(),
            Some("Payment within 30 days.".to_string())
        );
    }

    #[test]
    fn test_whitespace_only_is_no_text() {
        let doc = UploadedDocument::new("blank.txt", b" \n\t \n".to_vec());
        assert!(matches!(extract_text(&doc), Ok(None)));
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let doc = UploadedDocument::new("broken.pdf", b"not really a pdf".to_vec());
        assert!(matches!(extract_text(&doc), Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let doc = UploadedDocument::new("broken.docx", b"PK but not a zip".to_vec());
        assert!(matches!(extract_text(&doc), Err(ExtractError::Docx(_))));
    }
}
