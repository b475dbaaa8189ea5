//! Raw lexicon scores and normalized probabilities

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Emotion;

/// Sparse raw scores: a label is present only if one of its terms matched.
/// Missing labels read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    scores: BTreeMap<Emotion, u32>,
}

impl ScoreVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `emotion`, creating the entry if needed.
    /// Saturates at `u32::MAX`.
    pub fn add(&mut self, emotion: Emotion, weight: u32) {
        let slot = self.scores.entry(emotion).or_insert(0);
        *slot = slot.saturating_add(weight);
    }

    pub fn get(&self, emotion: Emotion) -> u32 {
        self.scores.get(&emotion).copied().unwrap_or(0)
    }

    pub fn contains(&self, emotion: Emotion) -> bool {
        self.scores.contains_key(&emotion)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        self.scores.iter().map(|(e, s)| (*e, *s))
    }
}

impl FromIterator<(Emotion, u32)> for ScoreVector {
    fn from_iter<I: IntoIterator<Item = (Emotion, u32)>>(iter: I) -> Self {
        let mut scores = ScoreVector::new();
        for (emotion, weight) in iter {
            scores.add(emotion, weight);
        }
        scores
    }
}

/// Dense probability distribution over the closed label set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDistribution {
    probs: BTreeMap<Emotion, f64>,
}

impl ProbabilityDistribution {
    /// Build from explicit probabilities; every label not given is zero.
    pub fn from_probs(probs: impl IntoIterator<Item = (Emotion, f64)>) -> Self {
        let mut map: BTreeMap<Emotion, f64> = Emotion::ALL.iter().map(|e| (*e, 0.0)).collect();
        for (emotion, p) in probs {
            map.insert(emotion, p);
        }
        Self { probs: map }
    }

    /// All mass on one label
    pub fn certain(emotion: Emotion) -> Self {
        Self::from_probs([(emotion, 1.0)])
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.probs.get(&emotion).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.probs.values().sum()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Labels in canonical order with their probability
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.probs.iter().map(|(e, p)| (*e, *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scores_read_as_zero() {
        let mut scores = ScoreVector::new();
        scores.add(Emotion::Joy, 2);
        scores.add(Emotion::Joy, 1);
        assert_eq!(scores.get(Emotion::Joy), 3);
        assert_eq!(scores.get(Emotion::Anger), 0);
        assert!(!scores.contains(Emotion::Anger));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn test_add_saturates() {
        let mut scores = ScoreVector::new();
        scores.add(Emotion::Joy, u32::MAX - 1);
        scores.add(Emotion::Joy, 5);
        assert_eq!(scores.get(Emotion::Joy), u32::MAX);
    }

    #[test]
    fn test_distribution_is_dense() {
        let dist = ProbabilityDistribution::certain(Emotion::Calm);
        assert_eq!(dist.len(), Emotion::ALL.len());
        assert_eq!(dist.get(Emotion::Calm), 1.0);
        assert_eq!(dist.get(Emotion::Joy), 0.0);
        assert!((dist.sum() - 1.0).abs() < 1e-12);
    }
}
