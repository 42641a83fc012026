//! Analysis report: the model's reply plus derived display data.

use crate::pipeline::score::{self, ComponentKind, MatchBand};
use crate::request::AnalysisMode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The outcome of one analysis action.
///
/// `text` is always present: on provider failure it carries the
/// user-facing error message instead of a report, flagged by
/// `provider_failed` so UIs can style it differently without parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Which analysis produced this report.
    pub mode: AnalysisMode,
    /// The markdown report text, or a provider-error message in its place.
    pub text: String,
    /// Best-effort overall ATS match score scanned from the reply.
    pub match_score: Option<u8>,
    /// Best-effort component sub-scores, in reply order.
    pub component_scores: Vec<(ComponentKind, u8)>,
    /// Band derived from `match_score` for gauge colouring.
    pub band: Option<MatchBand>,
    /// True when `text` is a provider-error message, not a report.
    pub provider_failed: bool,
}

impl Report {
    /// Build a report from a successful model reply, running the
    /// best-effort score scans.
    pub fn from_reply(mode: AnalysisMode, text: String) -> Self {
        let match_score = score::overall_match_score(&text);
        let component_scores = score::component_scores(&text);
        let band = match_score.map(MatchBand::for_score);
        Self {
            mode,
            text,
            match_score,
            component_scores,
            band,
            provider_failed: false,
        }
    }

    /// Build a placeholder report carrying a provider-error message.
    ///
    /// The session keeps functioning; only this interaction shows the
    /// error text where the report would have been.
    pub fn from_provider_error(mode: AnalysisMode, message: String) -> Self {
        Self {
            mode,
            text: message,
            match_score: None,
            component_scores: Vec::new(),
            band: None,
            provider_failed: true,
        }
    }

    /// Suggested filename for downloading this report, stamped with the
    /// current local time.
    pub fn suggested_filename(&self) -> String {
        report_filename(self.mode, chrono::Local::now().naive_local())
    }
}

/// Compose the download filename: `<Label>_<YYYYMMDD_HHMMSS>.txt`.
///
/// Takes the timestamp as a value so tests (and callers batching several
/// downloads) control it.
pub fn report_filename(mode: AnalysisMode, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.txt",
        mode.report_label(),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 5)
            .unwrap()
            .and_hms_opt(14, 22, 33)
            .unwrap()
    }

    #[test]
    fn filename_format() {
        assert_eq!(
            report_filename(AnalysisMode::AtsMatch, ts()),
            "ATS_Match_Report_20250805_142233.txt"
        );
        assert_eq!(
            report_filename(AnalysisMode::HrEvaluation, ts()),
            "HR_Evaluation_Report_20250805_142233.txt"
        );
    }

    #[test]
    fn from_reply_scans_scores() {
        let reply = "Overall Match Score: 73%\n- Keyword Match: 70%".to_string();
        let report = Report::from_reply(AnalysisMode::AtsMatch, reply);
        assert_eq!(report.match_score, Some(73));
        assert_eq!(report.band, Some(MatchBand::Good));
        assert_eq!(report.component_scores.len(), 1);
        assert!(!report.provider_failed);
    }

    #[test]
    fn from_reply_without_scores_still_renders() {
        let report =
            Report::from_reply(AnalysisMode::HrEvaluation, "A thoughtful evaluation.".into());
        assert_eq!(report.match_score, None);
        assert_eq!(report.band, None);
        assert_eq!(report.text, "A thoughtful evaluation.");
    }

    #[test]
    fn provider_error_report_is_flagged() {
        let report = Report::from_provider_error(
            AnalysisMode::AtsMatch,
            "Error: API quota exceeded. Please try again later.".into(),
        );
        assert!(report.provider_failed);
        assert_eq!(report.match_score, None);
        assert!(report.text.contains("quota"));
    }
}
