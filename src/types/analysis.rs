//! Result of one analysis call

use serde::Serialize;

use crate::types::{AffectCoordinate, Emotion, ProbabilityDistribution, ScoreVector};

/// Immutable outcome of analyzing one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionAnalysisResult {
    text: String,
    scores: ScoreVector,
    distribution: ProbabilityDistribution,
    top_labels: Vec<Emotion>,
    affect: AffectCoordinate,
}

impl EmotionAnalysisResult {
    pub fn new(
        text: impl Into<String>,
        scores: ScoreVector,
        distribution: ProbabilityDistribution,
        top_labels: Vec<Emotion>,
        affect: AffectCoordinate,
    ) -> Self {
        Self {
            text: text.into(),
            scores,
            distribution,
            top_labels,
            affect,
        }
    }

    /// Original input, verbatim
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub fn distribution(&self) -> &ProbabilityDistribution {
        &self.distribution
    }

    /// Highest-probability labels, best first
    pub fn top_labels(&self) -> &[Emotion] {
        &self.top_labels
    }

    pub fn affect(&self) -> AffectCoordinate {
        self.affect
    }

    /// Whether any lexicon term matched
    pub fn matched(&self) -> bool {
        !self.scores.is_empty()
    }
}
