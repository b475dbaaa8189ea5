//! Emotion analyzer: normalizer → scorer → aggregator → affect mapper

use tracing::debug;

use crate::core::aggregator::{aggregate, pick_single_best, select_top_labels};
use crate::core::affect::to_affect;
use crate::core::lexicon::Lexicon;
use crate::core::scorer::score;
use crate::types::{Emotion, EmotionAnalysisResult, ValidationError};
use crate::{DEFAULT_LABEL, DEFAULT_TOP_K};

/// Analyzer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Label used when nothing matches
    pub default_label: Emotion,
    /// How many labels to keep in `top_labels`
    pub top_k: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Stateless analyzer over an immutable lexicon
#[derive(Debug, Clone)]
pub struct EmotionAnalyzer {
    lexicon: Lexicon,
    config: AnalyzerConfig,
}

impl EmotionAnalyzer {
    pub fn new(lexicon: Lexicon, config: AnalyzerConfig) -> Self {
        Self { lexicon, config }
    }

    /// Builtin lexicon, default settings
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin(), AnalyzerConfig::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Full analysis of one text. Blank text is rejected.
    pub fn analyze(&self, text: &str) -> Result<EmotionAnalysisResult, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let scores = score(text, &self.lexicon);
        let distribution = aggregate(&scores, self.lexicon.labels(), self.config.default_label);
        let top_labels = select_top_labels(&distribution, self.config.top_k);
        let affect = to_affect(&distribution);

        debug!(
            matched = scores.len(),
            top = ?top_labels,
            valence = affect.valence,
            arousal = affect.arousal,
            "analyzed text"
        );

        Ok(EmotionAnalysisResult::new(text, scores, distribution, top_labels, affect))
    }

    /// Single best label; blank text yields the default label
    pub fn guess(&self, text: &str) -> Emotion {
        match self.analyze(text) {
            Ok(result) => pick_single_best(result.distribution()),
            Err(_) => self.config.default_label,
        }
    }
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// TESTS
// =============================================================================
