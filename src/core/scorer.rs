//! Lexicon scorer: raw integer score per emotion
//!
//! A term counts once if it appears as a whole word (or, for phrases, as a
//! contiguous run of whole words) in the normalized text.

use tracing::trace;

use crate::core::lexicon::Lexicon;
use crate::core::normalizer::normalize;
use crate::types::ScoreVector;

/// Score `text` against `lexicon`. Only labels with a match are present.
pub fn score(text: &str, lexicon: &Lexicon) -> ScoreVector {
    let normalized = normalize(text);
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

    let mut scores = ScoreVector::new();
    for (emotion, term, weight) in lexicon.iter() {
        if contains_term(&tokens, term) {
            trace!(%emotion, term, weight, "term matched");
            scores.add(emotion, weight);
        }
    }
    scores
}

/// Whole-word match of a normalized term against the text tokens
fn contains_term(tokens: &[&str], term: &str) -> bool {
    let needle: Vec<&str> = term.split(' ').filter(|t| !t.is_empty()).collect();
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens.windows(needle.len()).any(|w| w == needle.as_slice())
}

// =============================================================================
// TESTS
// =============================================================================
