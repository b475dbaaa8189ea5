//! Valence/arousal coordinate

use serde::{Deserialize, Serialize};

/// Point in the 2D affect space. Both axes live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffectCoordinate {
    /// Pleasantness
    pub valence: f64,
    /// Activation intensity
    pub arousal: f64,
}

impl AffectCoordinate {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// Center of the range
    pub const MIDPOINT: AffectCoordinate = AffectCoordinate {
        valence: 0.5,
        arousal: 0.5,
    };

    /// Create a coordinate, clamped into range
    pub fn new(valence: f64, arousal: f64) -> Self {
        Self { valence, arousal }.clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            valence: self.valence.clamp(Self::MIN, Self::MAX),
            arousal: self.arousal.clamp(Self::MIN, Self::MAX),
        }
    }
}

impl std::fmt::Display for AffectCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "valence:{:.2}, arousal:{:.2}", self.valence, self.arousal)
    }
}
