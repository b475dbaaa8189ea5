//! emoset: lexicon emotion scoring and labeled dataset builder
//!
//! Text → normalizer → scorer → aggregator → (affect mapper, top labels)
//! → prompt → renderer → dataset persistence

pub mod core;
pub mod types;
pub mod logging;

// =============================================================================
// ANALYSIS
// =============================================================================

/// Number of labels woven into the prompt
pub const DEFAULT_TOP_K: usize = 2;

/// Label used when no lexicon term matches
pub const DEFAULT_LABEL: types::Emotion = types::Emotion::Calm;

// =============================================================================
// RENDERING
// =============================================================================

/// Default artifact width in pixels
pub const ARTIFACT_WIDTH: u32 = 896;

/// Default artifact height in pixels
pub const ARTIFACT_HEIGHT: u32 = 448;

/// Largest seed accepted by the CLI
pub const MAX_SEED: u64 = 10_000_000;

// =============================================================================
// DATASET LAYOUT
// =============================================================================

/// Artifact file extension
pub const ARTIFACT_EXT: &str = "png";

/// Sidecar file extension (content is JSON)
pub const SIDECAR_EXT: &str = "txt";

/// Cumulative index file name
pub const INDEX_FILE_NAME: &str = "index.csv";

/// Zero-padding width of per-label sequence numbers
pub const SEQUENCE_DIGITS: usize = 5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
