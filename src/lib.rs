//! # resume-insight
//!
//! Analyze resumes (PDF) against job descriptions using the Gemini API.
//!
//! ## What it does
//!
//! Given the raw bytes of a resume PDF and a job description, this crate
//! extracts the resume text, composes one of five fixed analysis prompts
//! (HR evaluation, skill enhancement, ATS match, resume comparison, chat),
//! sends it to the model, and returns the markdown report together with
//! best-effort derived data — an overall ATS match score, four component
//! sub-scores, and a coarse match band suitable for a gauge display.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract  per-page text via lopdf (CPU-bound, spawn_blocking)
//!  ├─ 2. Sanitize drop non-interchangeable characters, trim
//!  ├─ 3. Compose  one of five fixed prompt templates
//!  ├─ 4. Generate single Gemini generateContent call (no retry)
//!  └─ 5. Scan     best-effort match-score extraction from the reply
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_insight::{Analyzer, AnalyzerConfig, AnalysisMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key read from GEMINI_API_KEY / GOOGLE_API_KEY
//!     let mut analyzer = Analyzer::new(AnalyzerConfig::default())?;
//!     let resume = std::fs::read("resume.pdf")?;
//!     let report = analyzer
//!         .analyze(AnalysisMode::AtsMatch, &resume, "Senior Rust engineer…")
//!         .await?;
//!     println!("{}", report.text);
//!     if let Some(score) = report.match_score {
//!         eprintln!("overall match: {score}%");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-insight` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! resume-insight = { version = "0.2", default-features = false }
//! ```
//!
//! ## Failure model
//!
//! Extraction failures are typed ([`ExtractError`]) and never panic; a
//! single unreadable page is skipped, not fatal. Provider failures are
//! returned as [`ProviderError`] and rendered into the report text by the
//! orchestration layer, so an expired key or exhausted quota degrades one
//! interaction instead of the whole session.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod chat;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod request;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::Analyzer;
pub use chat::{ChatHistory, ChatRole, ChatTurn};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};
pub use error::{ExtractError, InsightError, PageSkip, ProviderError};
pub use pipeline::extract::{extract, extract_report, validate, Extraction};
pub use pipeline::score::{component_scores, overall_match_score, ComponentKind, MatchBand};
pub use report::{report_filename, Report};
pub use request::{AnalysisMode, AnalysisRequest, ChatContext};
