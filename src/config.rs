//! Configuration types for the analyzer.
//!
//! All behaviour is controlled through [`AnalyzerConfig`], built via its
//! [`AnalyzerConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs, serialise them for logging, and diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::InsightError;
use serde::{Deserialize, Serialize};

/// Default Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for resume analysis.
///
/// Built via [`AnalyzerConfig::builder()`] or using
/// [`AnalyzerConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_insight::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .model("gemini-2.5-pro")
///     .temperature(0.4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Gemini model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// API key override. If None, read from `GEMINI_API_KEY`, then
    /// `GOOGLE_API_KEY`, at client construction time.
    ///
    /// Excluded from serialisation and redacted from Debug so configs can
    /// be logged and diffed without leaking the credential.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Sampling temperature. Default: 0.7.
    ///
    /// The reports are advisory prose, not transcription; moderate
    /// temperature keeps recommendations varied without drifting from the
    /// supplied resume text.
    pub temperature: f32,

    /// Maximum tokens the model may generate per report. Default: 4096.
    ///
    /// The longest template (comparison) routinely produces 2 000+ output
    /// tokens; setting this too low truncates the report mid-table.
    pub max_output_tokens: u32,

    /// Per-call HTTP timeout in seconds. Default: 120.
    ///
    /// There is no retry anywhere in this crate; a timed-out call is
    /// surfaced once as a provider error and the user decides whether to
    /// press the button again.
    pub api_timeout_secs: u64,

    /// Capacity of the extraction memo cache (entries). Default: 16.
    ///
    /// Extraction is memoized by content hash so re-running an analysis on
    /// the same upload never re-parses the PDF. A session touches a
    /// handful of files at most, so a small FIFO is plenty.
    pub cache_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 4096,
            api_timeout_secs: 120,
            cache_capacity: 16,
        }
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Create a new builder for `AnalyzerConfig`.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the API key: explicit config first, then environment.
    pub fn resolve_api_key(&self) -> Result<String, InsightError> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        for var in ["GEMINI_API_KEY", "GOOGLE_API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    return Ok(key);
                }
            }
        }
        Err(InsightError::MissingApiKey)
    }
}

/// Builder for [`AnalyzerConfig`].
#[derive(Debug)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn cache_capacity(mut self, n: usize) -> Self {
        self.config.cache_capacity = n.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalyzerConfig, InsightError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(InsightError::InvalidConfig(
                "Model name must not be empty".into(),
            ));
        }
        if c.max_output_tokens == 0 {
            return Err(InsightError::InvalidConfig(
                "max_output_tokens must be ≥ 1".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(InsightError::InvalidConfig(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
