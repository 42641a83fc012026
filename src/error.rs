//! Error types for the resume-insight library.
//!
//! Three distinct error types reflect three distinct failure modes:
//!
//! * [`InsightError`] — **Fatal**: the requested analysis cannot proceed
//!   at all (unreadable document, missing job description, invalid
//!   configuration). Returned as `Err(InsightError)` from the top-level
//!   [`crate::analyze::Analyzer`] operations.
//!
//! * [`PageSkip`] — **Non-fatal**: a single page of the PDF could not be
//!   decoded but all other pages are fine. Recorded inside
//!   [`crate::pipeline::extract::Extraction`] so callers can inspect
//!   partial success rather than losing the whole resume to one bad page.
//!
//! * [`ProviderError`] — **Degrading**: the model call failed. Caught at
//!   the boundary of the outbound request and rendered into a user-facing
//!   message shown *in place of* the report, so the interactive session
//!   keeps functioning.

use thiserror::Error;

/// All fatal errors returned by the resume-insight library.
///
/// Page-level failures use [`PageSkip`] and are stored in
/// [`crate::pipeline::extract::Extraction`] rather than propagated here.
#[derive(Debug, Error)]
pub enum InsightError {
    // ── Document errors ───────────────────────────────────────────────────
    /// Text extraction failed for the uploaded document.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    // ── Precondition errors ───────────────────────────────────────────────
    /// The selected analysis mode requires a resume but none was supplied.
    #[error("No resume provided. Upload a resume PDF before running this analysis.")]
    MissingResume,

    /// The selected analysis mode requires a job description but it was
    /// empty. Checked before any model call so no outbound request is
    /// wasted.
    #[error("No job description provided. Paste the job description before running this analysis.")]
    MissingJobDescription,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No API key could be found in the configuration or environment.
    #[error(
        "No Gemini API key configured.\n\
         Set GEMINI_API_KEY (or GOOGLE_API_KEY), or supply one via AnalyzerConfig."
    )]
    MissingApiKey,

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures of the text extractor.
///
/// These never escape the extractor as panics; callers decide the user
/// messaging. Per-page failures are *not* represented here — a bad page is
/// skipped and surfaced as a [`PageSkip`] in the extraction report.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The bytes could not be parsed as a PDF at all, or the document has
    /// no accessible pages.
    #[error("The file could not be read as a PDF: {detail}\nMake sure the upload is a valid PDF document.")]
    CorruptDocument { detail: String },

    /// The document parsed but yielded no usable text on any page —
    /// typically a scanned image or an unsupported encoding.
    #[error(
        "No text could be extracted from this PDF.\n\
         It may be a scanned image. Try re-saving it as a text-based PDF or exporting it from your editor."
    )]
    NoExtractableText,
}

/// A non-fatal, per-page extraction failure.
///
/// Stored in [`crate::pipeline::extract::Extraction::skipped_pages`] when a
/// page fails to decode. The overall extraction continues with the
/// remaining pages and only fails if *nothing* yields text.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
#[error("Page {page}: extraction skipped: {detail}")]
pub struct PageSkip {
    /// 1-indexed page number as reported by the document.
    pub page: u32,
    pub detail: String,
}

/// Errors from the text-generation provider.
///
/// The taxonomy is deliberately coarse: the caller only needs to pick a
/// user-facing message and decide whether a different key or a later retry
/// could help. No automatic retry happens anywhere in this crate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 401/403 or an API_KEY-flavoured error body.
    #[error("Invalid API key")]
    InvalidCredential,

    /// The account's quota is exhausted.
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// HTTP 429 without a quota marker.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Transport failures, malformed responses, empty candidates, 5xx.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// The message surfaced to the user *in place of* the report.
    ///
    /// Kept deliberately actionable: each variant tells the user the one
    /// thing they can do about it.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::InvalidCredential => {
                "Error: Invalid API key. Check your GEMINI_API_KEY and try again.".to_string()
            }
            ProviderError::QuotaExceeded => {
                "Error: API quota exceeded. Please try again later.".to_string()
            }
            ProviderError::RateLimited => {
                "Error: Rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            ProviderError::Other(detail) => {
                format!("Error generating response: {detail}")
            }
        }
    }
}
