//! Error types for LutPlay.

use thiserror::Error;

/// Shader stage identifier, used to name the failing stage in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Main error type for LutPlay operations.
///
/// Shader and pipeline errors are fatal at initialization: rendering setup
/// aborts entirely, nothing is retried.
#[derive(Error, Debug)]
pub enum LutPlayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("pipeline link failed: {0}")]
    ProgramLink(String),

    #[error("shader binding `{0}` not found; shader source and binding code are out of sync")]
    MissingBinding(String),

    #[error("media error: {0}")]
    Media(String),
}

/// Result type alias for LutPlay operations.
pub type Result<T> = std::result::Result<T, LutPlayError>;
