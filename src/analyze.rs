//! Top-level analysis entry points.
//!
//! [`Analyzer`] owns the three long-lived pieces of state — configuration,
//! the Gemini client, and the extraction memo — and wires the pipeline
//! stages together: precondition checks, cached extraction, prompt
//! composition, one model call, score scan.
//!
//! ## Error surfaces
//!
//! Preconditions and extraction failures return `Err(InsightError)` before
//! any outbound request is made. Provider failures do *not*: they come
//! back as `Ok(Report)` with [`Report::provider_failed`] set and the
//! user-facing message in `Report::text`, so one failed call never takes
//! down the session.

use crate::chat::{ChatHistory, ChatTurn};
use crate::config::AnalyzerConfig;
use crate::error::InsightError;
use crate::pipeline::extract::{self, Extraction};
use crate::pipeline::llm::GeminiClient;
use crate::pipeline::memo::ExtractionCache;
use crate::report::Report;
use crate::request::{AnalysisMode, AnalysisRequest, ChatContext};
use tracing::{info, warn};

/// Orchestrates resume analysis end to end.
///
/// Construct once per process and reuse: the Gemini HTTP client and the
/// extraction memo live here, so rebuilding an `Analyzer` per request
/// throws away both.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalyzerConfig,
    client: GeminiClient,
    cache: ExtractionCache,
}

impl Analyzer {
    /// Build an analyzer, resolving the API key and constructing the
    /// pooled HTTP client.
    pub fn new(config: AnalyzerConfig) -> Result<Self, InsightError> {
        let client = GeminiClient::new(&config)?;
        let cache = ExtractionCache::new(config.cache_capacity);
        Ok(Self {
            config,
            client,
            cache,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Extract resume text with memoization, off the async executor.
    ///
    /// Parsing is CPU-bound, so a miss runs in `spawn_blocking`; a hit
    /// returns without touching the blocking pool.
    pub async fn extract_text(&mut self, resume: &[u8]) -> Result<Extraction, InsightError> {
        if let Some(hit) = self.cache.get(resume) {
            return Ok(hit);
        }

        let bytes = resume.to_vec();
        let extraction = tokio::task::spawn_blocking(move || extract::extract_report(&bytes))
            .await
            .map_err(|e| InsightError::Internal(format!("extraction task panicked: {e}")))??;

        self.cache.insert(resume, extraction.clone());
        Ok(extraction)
    }

    /// Run a single-resume analysis (HR evaluation, skill enhancement, or
    /// ATS match).
    ///
    /// # Errors
    /// * [`InsightError::MissingResume`] / [`InsightError::MissingJobDescription`]
    ///   — checked before any model call.
    /// * [`InsightError::Extract`] — the resume could not be read.
    ///
    /// Provider failures are returned as `Ok(report)` with
    /// `report.provider_failed == true`.
    pub async fn analyze(
        &mut self,
        mode: AnalysisMode,
        resume: &[u8],
        job_description: &str,
    ) -> Result<Report, InsightError> {
        // ── Step 1: Preconditions, before anything leaves the process ────
        if matches!(mode, AnalysisMode::Comparison) {
            return Err(InsightError::Internal(
                "comparison takes two resumes; call Analyzer::compare".to_string(),
            ));
        }
        if matches!(mode, AnalysisMode::Chat) {
            return Err(InsightError::Internal(
                "chat is conversational; call Analyzer::chat".to_string(),
            ));
        }
        if resume.is_empty() {
            return Err(InsightError::MissingResume);
        }
        if job_description.trim().is_empty() {
            return Err(InsightError::MissingJobDescription);
        }

        // ── Step 2: Extract (memoized) ───────────────────────────────────
        let extraction = self.extract_text(resume).await?;
        info!(
            "Resume extracted: {} chars across {} pages",
            extraction.text.len(),
            extraction.page_count
        );

        // ── Step 3: Compose ──────────────────────────────────────────────
        let job_description = job_description.to_string();
        let request = match mode {
            AnalysisMode::HrEvaluation => AnalysisRequest::HrEvaluation {
                resume: extraction.text,
                job_description,
            },
            AnalysisMode::SkillEnhancement => AnalysisRequest::SkillEnhancement {
                resume: extraction.text,
                job_description,
            },
            _ => AnalysisRequest::AtsMatch {
                resume: extraction.text,
                job_description,
            },
        };

        // ── Step 4: Generate + scan ──────────────────────────────────────
        Ok(self.generate_report(request).await)
    }

    /// Compare two resumes against one job description.
    pub async fn compare(
        &mut self,
        resume_a: &[u8],
        resume_b: &[u8],
        job_description: &str,
    ) -> Result<Report, InsightError> {
        if resume_a.is_empty() || resume_b.is_empty() {
            return Err(InsightError::MissingResume);
        }
        if job_description.trim().is_empty() {
            return Err(InsightError::MissingJobDescription);
        }

        let a = self.extract_text(resume_a).await?;
        let b = self.extract_text(resume_b).await?;

        let request = AnalysisRequest::Comparison {
            resume_a: a.text,
            resume_b: b.text,
            job_description: job_description.to_string(),
        };

        Ok(self.generate_report(request).await)
    }

    /// Answer one chat question, appending both turns to `history`.
    ///
    /// The composed prompt is the standing persona instruction (with or
    /// without resume context), the transcript so far, and the live
    /// question. A provider failure becomes the assistant turn's content —
    /// the conversation continues either way, so this method only fails on
    /// internal errors.
    pub async fn chat(
        &mut self,
        history: &mut ChatHistory,
        question: &str,
        context: Option<ChatContext>,
    ) -> Result<ChatTurn, InsightError> {
        let system = AnalysisRequest::Chat { context }.compose();

        let mut prompt = system;
        let transcript = history.transcript();
        if !transcript.is_empty() {
            prompt.push_str("\n\nConversation so far:\n");
            prompt.push_str(&transcript);
        }
        prompt.push_str("\n\nUser Question: ");
        prompt.push_str(question);

        history.push_user(question);

        let content = match self.client.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat call failed: {e}");
                e.user_message()
            }
        };

        history.push_assistant(content.clone());
        Ok(ChatTurn::assistant(content))
    }

    /// One model call, with provider failure folded into the report.
    async fn generate_report(&self, request: AnalysisRequest) -> Report {
        let mode = request.mode();
        let prompt = request.compose();
        info!("Running {mode} via {}", self.client.model());

        match self.client.generate(&prompt).await {
            Ok(reply) => Report::from_reply(mode, reply),
            Err(e) => {
                warn!("{mode} call failed: {e}");
                Report::from_provider_error(mode, e.user_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::error::InsightError;

    fn analyzer() -> Analyzer {
        let config = AnalyzerConfig::builder()
            .api_key("test-key")
            .build()
            .unwrap();
        Analyzer::new(config).unwrap()
    }

    // A tiny but structurally valid single-page PDF is built in the
    // integration tests; unit tests here cover the precondition paths that
    // must reject before any extraction or network call happens.

    #[tokio::test]
    async fn empty_resume_is_rejected_first() {
        let mut a = analyzer();
        let err = a
            .analyze(AnalysisMode::AtsMatch, b"", "some job")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::MissingResume));
    }

    #[tokio::test]
    async fn blank_job_description_is_rejected() {
        let mut a = analyzer();
        let err = a
            .analyze(AnalysisMode::AtsMatch, b"%PDF-1.4 stub", "   \n")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::MissingJobDescription));
    }

    #[tokio::test]
    async fn comparison_requires_both_resumes() {
        let mut a = analyzer();
        let err = a
            .compare(b"%PDF-1.4 stub", b"", "job")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::MissingResume));
    }

    #[tokio::test]
    async fn comparison_mode_is_not_routable_through_analyze() {
        let mut a = analyzer();
        let err = a
            .analyze(AnalysisMode::Comparison, b"%PDF-1.4 stub", "job")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::Internal(_)));
    }

    #[tokio::test]
    async fn corrupt_resume_fails_extraction_not_network() {
        let mut a = analyzer();
        let err = a
            .analyze(AnalysisMode::HrEvaluation, b"not a pdf at all", "job")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::Extract(_)));
    }

    #[tokio::test]
    async fn chat_failure_becomes_assistant_turn() {
        use crate::chat::ChatRole;

        let config = AnalyzerConfig::builder()
            .api_key("invalid-key-for-test")
            .api_timeout_secs(10)
            .build()
            .unwrap();
        let mut a = Analyzer::new(config).unwrap();
        let mut history = ChatHistory::new();

        // The key is bogus, so the call fails — in transport (offline) or at
        // the API (online). Either way the conversation keeps both turns and
        // the assistant turn carries the error message.
        let turn = a
            .chat(&mut history, "Is my summary too long?", None)
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, ChatRole::User);
        assert_eq!(history.turns()[1].content, turn.content);
        assert!(turn.content.starts_with("Error"), "got: {}", turn.content);
    }
}
