//! Persisted dataset samples
//!
//! One sample = artifact + sidecar + one row in the cumulative index.

use serde::{Deserialize, Serialize};

use crate::types::Emotion;

/// A saved sample. Created at save time, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub emotion: Emotion,
    /// Sequence number within `emotion`, starting at 1
    pub n: u32,
    pub seed: u64,
    pub phrase: String,
    pub prompt: String,
    /// UTC unix seconds
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    /// Artifact file name inside the dataset directory
    pub artifact_file: String,
    /// Sidecar file name inside the dataset directory
    pub sidecar_file: String,
}

impl DatasetRecord {
    /// Row for the cumulative index
    pub fn index_row(&self) -> IndexRow {
        IndexRow {
            filename_png: self.artifact_file.clone(),
            filename_txt: self.sidecar_file.clone(),
            emotion: self.emotion,
            n: self.n,
            seed: self.seed,
            phrase: self.phrase.clone(),
            prompt: self.prompt.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// One row of `index.csv`. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    pub filename_png: String,
    pub filename_txt: String,
    pub emotion: Emotion,
    pub n: u32,
    pub seed: u64,
    pub phrase: String,
    pub prompt: String,
    pub timestamp: i64,
}

/// JSON sidecar written next to each artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarMeta {
    pub emotion: Emotion,
    pub n: u32,
    pub timestamp: i64,
    pub seed: u64,
    pub phrase: String,
    pub prompt: String,
    /// Hex SHA-256 of `prompt`
    pub prompt_sha256: String,
    pub spec: ArtifactSpec,
}

/// Artifact dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub width: u32,
    pub height: u32,
}
