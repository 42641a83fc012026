//! PDF text extraction: pull per-page text out of raw bytes via lopdf.
//!
//! ## Why page-at-a-time?
//!
//! Resume PDFs come from every exporter imaginable, and a single page with
//! a broken content stream is common. Extracting page-by-page lets us skip
//! the bad page and keep the rest instead of losing the whole document to
//! one decode error. A skipped page is recorded in
//! [`Extraction::skipped_pages`] and logged, never raised.
//!
//! ## Sanitation
//!
//! PDF text decoding is lossy; fonts with broken unicode maps produce
//! replacement characters, and exporters sprinkle zero-width junk through
//! the text. Characters that would not survive UTF-8 interchange are
//! dropped rather than failing the page — the remainder of the page's text
//! is kept.

use crate::error::{ExtractError, PageSkip};
use lopdf::Document;
use tracing::{debug, warn};

/// Outcome of a successful extraction, with page-level detail.
///
/// [`extract`] is the thin wrapper for callers that only want the text.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Extraction {
    /// Whitespace-trimmed concatenation of every readable page's sanitized
    /// text, in page order, with no separator inserted between pages.
    /// Invariant: never empty.
    pub text: String,
    /// Total pages in the document, including skipped ones.
    pub page_count: usize,
    /// Pages whose text could not be decoded. Non-fatal.
    pub skipped_pages: Vec<PageSkip>,
}

/// Check that the bytes parse as a PDF with at least one accessible page.
///
/// Operates on a byte slice, so calling it before [`extract`] never
/// disturbs any read position — the same buffer can be passed to both.
pub fn validate(bytes: &[u8]) -> bool {
    match Document::load_mem(bytes) {
        Ok(doc) => !doc.get_pages().is_empty(),
        Err(_) => false,
    }
}

/// Extract the text content of a PDF, returning only the aggregate string.
///
/// See [`extract_report`] for the variant that also reports page counts
/// and skipped pages.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    extract_report(bytes).map(|r| r.text)
}

/// Extract the text content of a PDF with page-level detail.
///
/// # Errors
/// * [`ExtractError::CorruptDocument`] — the bytes are not a parseable PDF
///   or the document has no pages. No text pull is attempted.
/// * [`ExtractError::NoExtractableText`] — every page decoded to nothing
///   (scanned image, unsupported encoding). Returned instead of an empty
///   string so callers cannot mistake absence for content.
///
/// Deterministic: identical bytes always produce identical results, which
/// is what makes memoization by content hash safe
/// (see [`crate::pipeline::memo::ExtractionCache`]).
pub fn extract_report(bytes: &[u8]) -> Result<Extraction, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::CorruptDocument {
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractError::CorruptDocument {
            detail: "document has no pages".to_string(),
        });
    }
    let page_count = pages.len();

    let mut aggregate = String::new();
    let mut skipped_pages = Vec::new();

    for (&page_num, _) in pages.iter() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => {
                aggregate.push_str(&sanitize(&page_text));
            }
            Err(e) => {
                warn!("Page {}: extraction skipped — {}", page_num, e);
                skipped_pages.push(PageSkip {
                    page: page_num,
                    detail: e.to_string(),
                });
            }
        }
    }

    let trimmed = aggregate.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::NoExtractableText);
    }

    debug!(
        "Extracted {} chars from {} pages ({} skipped)",
        trimmed.len(),
        page_count,
        skipped_pages.len()
    );

    Ok(Extraction {
        text: trimmed.to_string(),
        page_count,
        skipped_pages,
    })
}

/// Characters that do not survive text interchange: the replacement
/// character left behind by lossy decoding, plus zero-width and other
/// invisible code points common in PDF text runs.
const DROPPED: [char; 7] = [
    '\u{FFFD}', '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
];

/// Drop non-interchangeable characters from one page's text.
///
/// Rust strings already cannot hold unpaired surrogates, so the only
/// artifacts left to handle are the ones lossy decoding produces. The rest
/// of the page's text is kept untouched.
fn sanitize(page_text: &str) -> String {
    if page_text.chars().any(|c| DROPPED.contains(&c)) {
        page_text.replace(DROPPED, "")
    } else {
        page_text.to_string()
    }
}
