//! Analysis request types: mode selection and prompt composition.
//!
//! An [`AnalysisRequest`] bundles a mode with the input texts it needs.
//! [`AnalysisRequest::compose`] is pure and total — same inputs, same
//! prompt bytes, no failure mode. Absent-input situations are rejected by
//! the caller ([`crate::analyze::Analyzer`]) before a request is built.

use crate::prompts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five fixed analysis modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// HR-style evaluation with a hiring recommendation.
    HrEvaluation,
    /// Skill-gap report with a learning roadmap.
    SkillEnhancement,
    /// ATS compatibility score and keyword analysis.
    AtsMatch,
    /// Two resumes compared against one job description.
    Comparison,
    /// Multi-turn chat assistant.
    Chat,
}

impl AnalysisMode {
    /// Fixed label used in the downloadable report filename.
    pub fn report_label(&self) -> &'static str {
        match self {
            AnalysisMode::HrEvaluation => "HR_Evaluation_Report",
            AnalysisMode::SkillEnhancement => "Skill_Enhancement_Report",
            AnalysisMode::AtsMatch => "ATS_Match_Report",
            AnalysisMode::Comparison => "Resume_Comparison_Report",
            AnalysisMode::Chat => "Chat_Transcript",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisMode::HrEvaluation => "HR Evaluation",
            AnalysisMode::SkillEnhancement => "Skill Enhancement",
            AnalysisMode::AtsMatch => "ATS Match Analysis",
            AnalysisMode::Comparison => "Resume Comparison",
            AnalysisMode::Chat => "Chat Assistant",
        };
        f.write_str(name)
    }
}

/// Resume and job description context for the chat assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub resume: String,
    pub job_description: String,
}

/// A fully-specified analysis request: mode plus the texts it requires.
///
/// Constructed per user action; not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisRequest {
    HrEvaluation {
        resume: String,
        job_description: String,
    },
    SkillEnhancement {
        resume: String,
        job_description: String,
    },
    AtsMatch {
        resume: String,
        job_description: String,
    },
    Comparison {
        resume_a: String,
        resume_b: String,
        job_description: String,
    },
    /// Chat with optional resume/job context. The composed prompt is the
    /// standing system instruction; the chat layer appends the transcript
    /// and the live question.
    Chat { context: Option<ChatContext> },
}

impl AnalysisRequest {
    /// The mode tag of this request.
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisRequest::HrEvaluation { .. } => AnalysisMode::HrEvaluation,
            AnalysisRequest::SkillEnhancement { .. } => AnalysisMode::SkillEnhancement,
            AnalysisRequest::AtsMatch { .. } => AnalysisMode::AtsMatch,
            AnalysisRequest::Comparison { .. } => AnalysisMode::Comparison,
            AnalysisRequest::Chat { .. } => AnalysisMode::Chat,
        }
    }

    /// Compose the prompt string for this request.
    ///
    /// Pure and deterministic: template selection is the only branching,
    /// and the supplied texts are substituted verbatim.
    pub fn compose(&self) -> String {
        match self {
            AnalysisRequest::HrEvaluation {
                resume,
                job_description,
            } => prompts::hr_evaluation(resume, job_description),
            AnalysisRequest::SkillEnhancement {
                resume,
                job_description,
            } => prompts::skill_enhancement(resume, job_description),
            AnalysisRequest::AtsMatch {
                resume,
                job_description,
            } => prompts::ats_match(resume, job_description),
            AnalysisRequest::Comparison {
                resume_a,
                resume_b,
                job_description,
            } => prompts::comparison(resume_a, resume_b, job_description),
            AnalysisRequest::Chat { context } => match context {
                Some(ctx) => prompts::chat_system(&ctx.resume, &ctx.job_description),
                None => prompts::CHAT_GENERIC.to_string(),
            },
        }
    }
}
