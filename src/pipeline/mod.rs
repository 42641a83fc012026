//! Pipeline stages for resume analysis.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ memo ──▶ (compose) ──▶ llm ──▶ score
//! (lopdf)    (FIFO)    (prompts)    (Gemini)  (regex scan)
//! ```
//!
//! 1. [`extract`] — pull per-page text out of the PDF bytes with page-level
//!    error tolerance; runs in `spawn_blocking` from the async entry points
//!    because parsing is CPU-bound
//! 2. [`memo`]    — bounded memoization of extraction keyed by content hash
//! 3. [`llm`]     — drive the single Gemini call; the only stage with
//!    network I/O
//! 4. [`score`]   — best-effort scans that pull scores out of the model's
//!    free-text reply for the gauge and bar displays

pub mod extract;
pub mod llm;
pub mod memo;
pub mod score;
