//! Error types for tileset flattening

use std::path::{Path, PathBuf};

/// Result type for tileset operations
pub type TilesResult<T> = Result<T, TilesError>;

/// Errors that abort a flattening run
#[derive(Debug, thiserror::Error)]
pub enum TilesError {
    /// Malformed document structure, tile shape, or empty result
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A leaf payload URI resolves to a file that does not exist
    #[error("Missing content: {}", .path.display())]
    MissingContent { path: PathBuf },

    /// A content URI that is neither a payload nor a nested tileset
    #[error("Unsupported reference: {uri}")]
    UnsupportedReference { uri: String },

    /// IO error reading or writing a file
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid run configuration
    #[error("Invalid config: {0}")]
    Config(String),
}

impl TilesError {
    /// Convenience constructor for structural violations
    pub fn invalid<T: ToString>(msg: T) -> Self {
        Self::InvalidDocument(msg.to_string())
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Short stable name of the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDocument(_) => "invalid-document",
            Self::MissingContent { .. } => "missing-content",
            Self::UnsupportedReference { .. } => "unsupported-reference",
            Self::Io { .. } => "io",
            Self::Json(_) => "json",
            Self::Config(_) => "config",
        }
    }
}
