//! Valence/arousal mapper
//!
//! Projects a distribution onto the [0, 1] x [0, 1] affect plane as a
//! probability-weighted sum of fixed per-emotion anchors.

use crate::types::{AffectCoordinate, Emotion, ProbabilityDistribution};

/// Anchor point of each emotion in affect space
pub fn anchor(emotion: Emotion) -> AffectCoordinate {
    let (valence, arousal) = match emotion {
        Emotion::Joy => (0.85, 0.65),
        Emotion::Sadness => (0.20, 0.30),
        Emotion::Anger => (0.15, 0.85),
        Emotion::Calm => (0.60, 0.25),
        Emotion::Mystery => (0.45, 0.40),
        Emotion::Energy => (0.70, 0.80),
    };
    AffectCoordinate { valence, arousal }
}

/// Convex combination of anchors, clamped to range.
/// An all-zero distribution maps to the midpoint.
pub fn to_affect(dist: &ProbabilityDistribution) -> AffectCoordinate {
    let mass = dist.sum();
    if mass <= 0.0 {
        return AffectCoordinate::MIDPOINT;
    }

    let (valence, arousal) = dist.iter().fold((0.0, 0.0), |(v, a), (emotion, p)| {
        let point = anchor(emotion);
        (v + p * point.valence, a + p * point.arousal)
    });
    AffectCoordinate::new(valence, arousal)
}

// =============================================================================
// TESTS
// =============================================================================
