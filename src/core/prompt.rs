//! Prompt synthesizer
//!
//! Output depends only on its inputs (no clock, no randomness), so a prompt
//! can serve as a cache key.

use sha2::{Digest, Sha256};

use crate::types::{Emotion, EmotionAnalysisResult};

/// Fixed description of the target artifact
pub const ARTIFACT_CLAUSE: &str = "ambient sound, sustained tones, minimal rhythm";

/// Fixed audio format suffix
pub const FORMAT_CLAUSE: &str = "24kHz, 10s, clean texture";

/// One descriptive line: text, top labels, artifact clause, affect.
pub fn synthesize_prompt(original_text: &str, result: &EmotionAnalysisResult) -> String {
    let mood = result
        .top_labels()
        .iter()
        .map(|e| e.name())
        .collect::<Vec<_>>()
        .join(", ");
    let affect = result.affect();

    format!(
        "{}. spectrogram of {} {}. valence:{:.2}, arousal:{:.2}, {}",
        original_text, mood, ARTIFACT_CLAUSE, affect.valence, affect.arousal, FORMAT_CLAUSE
    )
}

/// Prefix a prompt with its dataset label: `[emotion:joy] ...`
pub fn tag_prompt(label: Emotion, prompt: &str) -> String {
    format!("[emotion:{}] {}", label, prompt)
}

/// Lowercase hex SHA-256 of a prompt
pub fn prompt_digest(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
