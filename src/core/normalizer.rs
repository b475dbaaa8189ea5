//! Text normalizer: canonical form used for all lexicon matching

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE_NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lower-case, strip accents, turn punctuation into spaces, collapse spaces.
///
/// The output only contains `[a-z0-9 ]`, with single spaces and no leading
/// or trailing space, so `normalize` is idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let spaced = RE_NON_ALNUM.replace_all(&stripped, " ");
    RE_WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

// =============================================================================
// TESTS
// =============================================================================
