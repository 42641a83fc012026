//! Best-effort extraction of scores from the model's free-text reply.
//!
//! ## Why best-effort?
//!
//! The ATS template asks for `Overall Match Score: NN%`, but a language
//! model is under no obligation to comply. These scans are an enrichment
//! for the gauge and bar displays, not a contract: a missing or mangled
//! score line yields `None`/empty and the textual report is shown
//! unchanged. Nothing here can fail or block rendering.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// Tolerates markdown emphasis around the label ("**Overall Match Score:** 73%")
// and flexible spacing before the percent sign.
static RE_OVERALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Overall Match Score[:*\s]+(\d{1,3})\s*%").unwrap());

static RE_COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Keyword|Skills|Experience|Education)\s+Match[:*\s]+(\d{1,3})\s*%").unwrap()
});

/// Scan a model reply for the overall ATS match score.
///
/// Returns the first plausible (0-100) percentage following the
/// `Overall Match Score` label, or `None` when the pattern is absent or
/// out of range.
pub fn overall_match_score(reply: &str) -> Option<u8> {
    RE_OVERALL
        .captures(reply)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .filter(|&score| score <= 100)
}

/// The four component sub-scores the ATS template requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Keyword,
    Skills,
    Experience,
    Education,
}

impl ComponentKind {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Keyword" => Some(ComponentKind::Keyword),
            "Skills" => Some(ComponentKind::Skills),
            "Experience" => Some(ComponentKind::Experience),
            "Education" => Some(ComponentKind::Education),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Keyword => "Keyword Match",
            ComponentKind::Skills => "Skills Match",
            ComponentKind::Experience => "Experience Match",
            ComponentKind::Education => "Education Match",
        };
        f.write_str(name)
    }
}

/// Scan a model reply for the four `<Name> Match: NN%` component lines.
///
/// Each component is reported at most once (first occurrence wins, in
/// reply order). Free text without score lines yields an empty vec.
pub fn component_scores(reply: &str) -> Vec<(ComponentKind, u8)> {
    let mut found: Vec<(ComponentKind, u8)> = Vec::with_capacity(4);
    for caps in RE_COMPONENT.captures_iter(reply) {
        let Some(kind) = ComponentKind::from_label(&caps[1]) else {
            continue;
        };
        let Ok(score) = caps[2].parse::<u8>() else {
            continue;
        };
        if score > 100 || found.iter().any(|(k, _)| *k == kind) {
            continue;
        }
        found.push((kind, score));
    }
    found
}

/// Coarse band derived from the overall match score, driving the gauge
/// colouring and the one-line verdict next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    /// 80% and above.
    Excellent,
    /// 60-79%.
    Good,
    /// Below 60%.
    NeedsImprovement,
}

impl MatchBand {
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            MatchBand::Excellent
        } else if score >= 60 {
            MatchBand::Good
        } else {
            MatchBand::NeedsImprovement
        }
    }

    /// One-line verdict shown alongside the gauge.
    pub fn verdict(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "Excellent match — your resume is highly compatible with this job posting.",
            MatchBand::Good => "Good match — solid compatibility, some improvements recommended.",
            MatchBand::NeedsImprovement => {
                "Needs improvement — consider optimizing your resume for better ATS compatibility."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_score_line() {
        let reply = "## Overall Match Score\nOverall Match Score: 73%\n- Keyword Match: 70%";
        assert_eq!(overall_match_score(reply), Some(73));
    }

    #[test]
    fn extracts_score_with_markdown_emphasis() {
        let reply = "**Overall Match Score:** 88%";
        assert_eq!(overall_match_score(reply), Some(88));
    }

    #[test]
    fn missing_score_is_none_not_error() {
        assert_eq!(overall_match_score("The resume looks strong overall."), None);
        assert_eq!(overall_match_score(""), None);
    }

    #[test]
    fn implausible_score_rejected() {
        assert_eq!(overall_match_score("Overall Match Score: 250%"), None);
    }

    #[test]
    fn component_scan_finds_all_four() {
        let reply = "\
Overall Match Score: 73%
- Keyword Match: 70%
- Skills Match: 80%
- Experience Match: 65%
- Education Match: 90%";
        let scores = component_scores(reply);
        assert_eq!(scores.len(), 4);
        assert_eq!(scores[0], (ComponentKind::Keyword, 70));
        assert_eq!(scores[3], (ComponentKind::Education, 90));
    }

    #[test]
    fn duplicate_component_lines_first_wins() {
        let reply = "Skills Match: 80%\nSkills Match: 10%";
        assert_eq!(component_scores(reply), vec![(ComponentKind::Skills, 80)]);
    }

    #[test]
    fn free_text_yields_no_components() {
        assert!(component_scores("no scores here at all").is_empty());
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(MatchBand::for_score(80), MatchBand::Excellent);
        assert_eq!(MatchBand::for_score(79), MatchBand::Good);
        assert_eq!(MatchBand::for_score(60), MatchBand::Good);
        assert_eq!(MatchBand::for_score(59), MatchBand::NeedsImprovement);
    }
}
