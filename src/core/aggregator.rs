//! Probability aggregator and label selection
//!
//! Raw scores go through a max-shifted softmax over the matched labels;
//! unmatched labels get probability zero. Ties always break towards the
//! lexicographically smaller label name.

use std::cmp::Ordering;

use crate::types::{Emotion, ProbabilityDistribution, ScoreVector};

/// Turn raw scores into a distribution over `labels` (plus the closed set).
///
/// An empty score vector becomes a unit score on `default`.
pub fn aggregate(
    scores: &ScoreVector,
    labels: impl IntoIterator<Item = Emotion>,
    default: Emotion,
) -> ProbabilityDistribution {
    let zero_fill = labels.into_iter().map(|e| (e, 0.0));

    if scores.is_empty() {
        return ProbabilityDistribution::from_probs(zero_fill.chain([(default, 1.0)]));
    }

    let max = scores.iter().map(|(_, s)| s).max().unwrap_or(0) as f64;
    let exps: Vec<(Emotion, f64)> = scores
        .iter()
        .map(|(e, s)| (e, (s as f64 - max).exp()))
        .collect();
    let total: f64 = exps.iter().map(|(_, x)| x).sum();

    ProbabilityDistribution::from_probs(
        zero_fill.chain(exps.into_iter().map(|(e, x)| (e, x / total))),
    )
}

/// Descending probability, then ascending label name
fn rank(a: &(Emotion, f64), b: &(Emotion, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.name().cmp(b.0.name()))
}

/// Up to `k` labels with non-zero probability, best first
pub fn select_top_labels(dist: &ProbabilityDistribution, k: usize) -> Vec<Emotion> {
    let mut ranked: Vec<(Emotion, f64)> = dist.iter().filter(|(_, p)| *p > 0.0).collect();
    ranked.sort_by(rank);
    ranked.into_iter().take(k).map(|(e, _)| e).collect()
}

/// The single most probable label
pub fn pick_single_best(dist: &ProbabilityDistribution) -> Emotion {
    dist.iter()
        .min_by(rank)
        .map(|(e, _)| e)
        .unwrap_or(crate::DEFAULT_LABEL)
}

// =============================================================================
// TESTS
// =============================================================================
