// src/document/mod.rs
use std::panic::{self, AssertUnwindSafe};

use crate::utils::error::DocumentError;

/// Extracts the plain text of a PDF document, page by page.
///
/// Page order is preserved and every page that yields text is followed by
/// a newline. Pages without an embedded text layer (scanned images)
/// contribute nothing and are skipped silently; a readable PDF where every
/// page is like that produces an empty string, which is a normal outcome
/// rather than an error. Input the PDF library cannot open at all is a
/// [`DocumentError`]. The parsed document lives entirely inside the
/// extraction call, so it is released on every exit path.
pub fn extract_text(data: &[u8]) -> Result<String, DocumentError> {
    // pdf-extract can panic on malformed input instead of returning Err,
    // so the call sits behind an unwind boundary.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    let pages = match outcome {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(DocumentError::Parse(e.to_string())),
        Err(_) => return Err(DocumentError::ExtractionPanic),
    };

    let page_count = pages.len();
    let mut text = String::new();
    let mut skipped = 0usize;

    for (page_num, page_text) in pages.iter().enumerate() {
        if page_text.is_empty() {
            tracing::debug!("Page {} yielded no text, skipping", page_num + 1);
            skipped += 1;
            continue;
        }
        text.push_str(page_text);
        text.push('\n');
    }

    tracing::info!(
        "Extracted {} characters from {} page(s) ({} without text)",
        text.len(),
        page_count,
        skipped
    );

    Ok(text)
}
