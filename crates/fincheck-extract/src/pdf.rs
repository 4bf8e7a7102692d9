use std::path::{Path, PathBuf};

use crate::ExtractError;

/// Extract the text of every page of the PDF at `path`, concatenated in page
/// order.
///
/// No separator is inserted between pages beyond what the per-page text
/// already ends with.
///
/// # Errors
///
/// - [`ExtractError::Pdf`] if the file is not a readable PDF or a page's
///   content cannot be decoded.
/// - [`ExtractError::NoPages`] if the document has no pages.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load(path)?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }

    let mut text = String::new();
    // get_pages is keyed by 1-based page number, so iteration is document order.
    for &page_number in pages.keys() {
        let page_text = doc.extract_text(&[page_number])?;
        text.push_str(&page_text);
    }

    tracing::debug!(
        path = %path.display(),
        page_count = pages.len(),
        chars = text.chars().count(),
        "pdf text extracted"
    );

    Ok(text)
}

/// Run [`extract_pdf_text`] on the blocking thread pool.
///
/// A panic inside the PDF parser is reported as [`ExtractError::Task`]
/// instead of unwinding into the caller.
///
/// # Errors
///
/// Everything [`extract_pdf_text`] returns, plus [`ExtractError::Task`].
pub async fn extract_pdf_text_blocking(path: PathBuf) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&path))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))?
}
