//! PDF text extraction
//!
//! Text is pulled page by page with pdf-extract. Pages that produce no
//! text (scans, blank separators) are skipped and the remaining pages are
//! concatenated with no separator.

use pdf_extract::extract_text_from_mem_by_pages;

use crate::ExtractError;

/// Extract the text of every non-empty page, in page order
pub fn extract_pdf(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = extract_text_from_mem_by_pages(pdf_bytes).map_err(|e| {
        let error_msg = e.to_string();
        let lower = error_msg.to_lowercase();

        if lower.contains("encrypted") || lower.contains("password") {
            ExtractError::Pdf(format!("password-protected PDF: {}", error_msg))
        } else {
            ExtractError::Pdf(error_msg)
        }
    })?;

    Ok(join_pages(pages))
}

/// Concatenate page texts, dropping pages with no text
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect()
}
