//! Closed emotion label set

use std::str::FromStr;

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::core::normalizer::normalize;
use crate::types::ConfigError;

/// The six emotion classes the lexicon and dataset know about.
///
/// Variants are declared in ascending order of their canonical name, so the
/// derived `Ord` agrees with lexicographic label order. Serializes as the
/// canonical name; deserializes from the canonical name or any alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Emotion {
    Anger,
    Calm,
    Energy,
    Joy,
    Mystery,
    Sadness,
}

impl Emotion {
    /// Every label, in canonical (alphabetical) order
    pub const ALL: [Emotion; 6] = [
        Emotion::Anger,
        Emotion::Calm,
        Emotion::Energy,
        Emotion::Joy,
        Emotion::Mystery,
        Emotion::Sadness,
    ];

    /// Canonical lowercase name, used in file names and the index
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Calm => "calm",
            Emotion::Energy => "energy",
            Emotion::Joy => "joy",
            Emotion::Mystery => "mystery",
            Emotion::Sadness => "sadness",
        }
    }

    /// Terminal color for this label
    pub fn color(&self) -> Color {
        match self {
            Emotion::Anger => Color::Red,
            Emotion::Calm => Color::Cyan,
            Emotion::Energy => Color::Yellow,
            Emotion::Joy => Color::Green,
            Emotion::Mystery => Color::Magenta,
            Emotion::Sadness => Color::Blue,
        }
    }

    /// Resolve a label from its canonical name or a French alias.
    /// Case and accents are ignored.
    pub fn from_label(raw: &str) -> Option<Emotion> {
        match normalize(raw).as_str() {
            "anger" | "colere" => Some(Emotion::Anger),
            "calm" | "calme" => Some(Emotion::Calm),
            "energy" | "energie" => Some(Emotion::Energy),
            "joy" | "joie" => Some(Emotion::Joy),
            "mystery" | "mystere" => Some(Emotion::Mystery),
            "sadness" | "tristesse" | "sad" => Some(Emotion::Sadness),
            _ => None,
        }
    }
}

impl FromStr for Emotion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::from_label(s).ok_or_else(|| ConfigError::UnknownLabel(s.to_string()))
    }
}

impl TryFrom<String> for Emotion {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
