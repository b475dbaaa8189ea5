//! Core types for emoset

mod emotion;
mod scores;
mod affect;
mod analysis;
mod record;
mod error;

pub use emotion::Emotion;
pub use scores::{ScoreVector, ProbabilityDistribution};
pub use affect::AffectCoordinate;
pub use analysis::EmotionAnalysisResult;
pub use record::{DatasetRecord, IndexRow, SidecarMeta, ArtifactSpec};
pub use error::{ConfigError, ValidationError, RenderError, PersistenceError, PersistStep, Error, Result};
