//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating or writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// I/O error while streaming to the sink or reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP encoder error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The requested archive format has not been registered.
    #[error("Archive format not registered: {0}")]
    FormatNotRegistered(String),

    /// A format with the same name is already registered.
    #[error("Archive format already registered: {0}")]
    FormatAlreadyRegistered(String),

    /// An on-disk entry source could not be opened.
    #[error("Entry source not found: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background write task panicked or was aborted.
    #[error("Archive task failed: {0}")]
    TaskFailed(String),

    /// The completion was polled again after it already yielded its result.
    #[error("Archive completion already consumed")]
    CompletionConsumed,
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn ArchiveError___io___displays_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchiveError = io_err.into();

        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn ArchiveError___format_not_registered___displays_name() {
        let err = ArchiveError::FormatNotRegistered("zip-encryptable".to_string());

        assert_eq!(
            err.to_string(),
            "Archive format not registered: zip-encryptable"
        );
    }

    #[test]
    fn ArchiveError___format_already_registered___displays_name() {
        let err = ArchiveError::FormatAlreadyRegistered("zip".to_string());

        assert_eq!(err.to_string(), "Archive format already registered: zip");
    }

    #[test]
    fn ArchiveError___source_not_found___displays_path() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("/dist/main.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/dist/main.js"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn ArchiveError___completion_consumed___displays_message() {
        let err = ArchiveError::CompletionConsumed;

        assert_eq!(err.to_string(), "Archive completion already consumed");
    }

    #[test]
    fn ArchiveError___from_zip_error___converts() {
        let zip_err = zip::result::ZipError::FileNotFound;
        let err: ArchiveError = zip_err.into();

        assert!(matches!(err, ArchiveError::Zip(_)));
    }
}
