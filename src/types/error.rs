//! Error taxonomy
//!
//! Normalization and scoring are total. Only lexicon loading, rendering and
//! persistence touch fallible resources, and each has its own error type.
//! Every error exposes a stable `code()` for logs and JSON output.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed or unreadable lexicon source
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown emotion label '{0}'")]
    UnknownLabel(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "E101_CONFIG_READ",
            Self::Parse(_) => "E102_CONFIG_PARSE",
            Self::UnknownLabel(_) => "E103_CONFIG_UNKNOWN_LABEL",
        }
    }
}

/// Input rejected before analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is empty or blank")]
    EmptyText,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "E201_EMPTY_TEXT",
        }
    }
}

/// Renderer collaborator failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no renderer available and fallback disabled")]
    NoRenderer,

    #[error("invalid artifact size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("renderer failed: {0}")]
    Failed(String),
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoRenderer => "E301_NO_RENDERER",
            Self::InvalidSize { .. } => "E302_INVALID_SIZE",
            Self::Failed(_) => "E303_RENDER_FAILED",
        }
    }
}

/// Which persistence step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStep {
    CreateDir,
    ScanDir,
    WriteArtifact,
    WriteSidecar,
    ReadIndex,
    WriteIndex,
}

impl PersistStep {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreateDir => "E401_CREATE_DIR",
            Self::ScanDir => "E402_SCAN_DIR",
            Self::WriteArtifact => "E403_WRITE_ARTIFACT",
            Self::WriteSidecar => "E404_WRITE_SIDECAR",
            Self::ReadIndex => "E405_READ_INDEX",
            Self::WriteIndex => "E406_WRITE_INDEX",
        }
    }
}

impl std::fmt::Display for PersistStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CreateDir => "create directory",
            Self::ScanDir => "scan directory",
            Self::WriteArtifact => "write artifact",
            Self::WriteSidecar => "write sidecar",
            Self::ReadIndex => "read index",
            Self::WriteIndex => "write index",
        };
        write!(f, "{}", name)
    }
}

/// Filesystem failure while saving a sample
#[derive(Debug, Error)]
#[error("{step} failed for {}: {message}", .path.display())]
pub struct PersistenceError {
    pub step: PersistStep,
    pub path: PathBuf,
    pub message: String,
}

impl PersistenceError {
    pub fn new(step: PersistStep, path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self {
            step,
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.step.code()
    }
}

/// Any pipeline error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Validation(e) => e.code(),
            Self::Render(e) => e.code(),
            Self::Persistence(e) => e.code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_names_step() {
        let err = PersistenceError::new(PersistStep::WriteIndex, "/tmp/x/index.csv", "disk full");
        let msg = err.to_string();
        assert!(msg.contains("write index"), "{}", msg);
        assert!(msg.contains("index.csv"), "{}", msg);
        assert_eq!(err.code(), "E406_WRITE_INDEX");
    }

    #[test]
    fn test_umbrella_code_passthrough() {
        let err: Error = ValidationError::EmptyText.into();
        assert_eq!(err.code(), "E201_EMPTY_TEXT");
        let err: Error = RenderError::NoRenderer.into();
        assert_eq!(err.code(), "E301_NO_RENDERER");
    }
}
