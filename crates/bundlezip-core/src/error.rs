//! Error types for packaging operations

use bundlezip_archive::ArchiveError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packaging operations
pub type PackResult<T> = Result<T, PackError>;

/// Error type for packaging operations
#[derive(Error, Debug)]
pub enum PackError {
    /// An entry point was called out of order
    #[error("invalid cycle state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// The destination directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the archive to its destination failed
    #[error("failed to write archive {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    /// The archive could not be opened
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Options could not be parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Two artifacts in one manifest share a name
    #[error("duplicate artifact: {0}")]
    DuplicateArtifact(String),

    /// I/O error outside of archive writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Whether the error was caused by the host calling entry points out of order
    pub fn is_state_error(&self) -> bool {
        matches!(self, PackError::InvalidState { .. })
    }
}

impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        PackError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for PackError {
    fn from(err: toml::de::Error) -> Self {
        PackError::Config(err.to_string())
    }
}
