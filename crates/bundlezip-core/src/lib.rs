//! bundlezip-core - Build hook, output resolution and packaging lifecycle
//!
//! This crate provides the pieces that turn a build cycle into a zip archive:
//! - [`ArchiveOptions`] for configuring the archive
//! - [`Manifest`] and [`BuildArtifact`] describing the build output
//! - [`resolve_output_path`] for computing the archive location
//! - [`ZipPackager`], the [`BuildHook`] that ties a cycle together
//! - [`PackError`] for error handling

mod artifact;
mod completion;
mod config;
mod coordinator;
mod env;
mod error;
mod hook;
mod lifecycle;
mod resolve;
mod state;

pub use artifact::{ArtifactKind, ArtifactSource, BuildArtifact, Manifest};
pub use bundlezip_archive::EncryptionMethod;
pub use completion::{PackCompletion, PackOutcome, PackReport};
pub use config::{ArchiveOptions, FileFilter};
pub use coordinator::{PACKAGER_NAME, ZipPackager};
pub use env::{DEFAULT_BASENAME, PackageEnv};
pub use error::{PackError, PackResult};
pub use hook::{BuildHook, OutputAnnouncement};
pub use lifecycle::{CycleState, CycleTracker};
pub use resolve::{ResolveWarning, ResolvedOutput, resolve_output_path};
pub use state::PackagingState;

/// Log levels understood by host log callbacks
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl From<&tracing::Level> for LogLevel {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArchiveOptions, ArtifactKind, BuildArtifact, BuildHook, CycleState, EncryptionMethod,
        LogLevel, Manifest, OutputAnnouncement, PackCompletion, PackError, PackOutcome,
        PackResult, ZipPackager,
    };
}
