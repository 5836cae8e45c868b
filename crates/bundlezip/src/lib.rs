//! # bundlezip
//!
//! Packages the output of every build cycle into a single zip archive.
//!
//! bundlezip plugs into a build pipeline as a [`BuildHook`] and provides:
//! - Output path resolution from options, the announced output directory and
//!   the package name and version
//! - Optional password protection (ZipCrypto or AES-256)
//! - Source map companions for code artifacts
//! - A "create once" mode for watch builds
//! - Log forwarding to a host callback
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bundlezip = "0.1"
//! ```
//!
//! ## Packaging a Build Cycle
//!
//! ```ignore
//! use bundlezip::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> PackResult<()> {
//!     bundlezip::init_stderr_logging();
//!
//!     let options = ArchiveOptions::from_json(br#"{"outputDir": "release"}"#)?
//!         .with_filter(|artifact| artifact.name() == "README.txt");
//!     let mut packager = ZipPackager::new(options);
//!
//!     packager.output_announced(&OutputAnnouncement::for_dir("dist"))?;
//!
//!     let manifest = Manifest::new()
//!         .with(BuildArtifact::code("main.js", "console.log(1)").with_source_map("{}"))?
//!         .with(BuildArtifact::asset("README.txt", "notes"))?;
//!
//!     match packager.artifacts_ready(manifest).await? {
//!         PackOutcome::Created(report) => println!("wrote {}", report.path.display()),
//!         PackOutcome::Skipped => println!("archive already created"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`bundlezip_core`] - Options, manifest, path resolution and the packager
//! - [`bundlezip_archive`] - Zip writer, format registry and completion future
//! - [`bundlezip_logging`] - Tracing layer forwarding to a host callback

// Re-export core types
pub use bundlezip_core::{
    ArchiveOptions, ArtifactKind, ArtifactSource, BuildArtifact, BuildHook, CycleState,
    DEFAULT_BASENAME, EncryptionMethod, FileFilter, LogLevel, Manifest, OutputAnnouncement,
    PACKAGER_NAME, PackCompletion, PackError, PackOutcome, PackReport, PackResult, PackageEnv,
    PackagingState, ResolveWarning, ResolvedOutput, ZipPackager, resolve_output_path,
};

// Re-export archive types
pub use bundlezip_archive::{
    ArchiveCompletion, ArchiveError, ArchiveOutcome, ArchiveSink, ArchiveWriter, EntrySource,
    FormatOptions, FormatRegistry, ZIP_ENCRYPTABLE_FORMAT, ZIP_FORMAT,
    ensure_encrypted_format_registered,
};

// Re-export logging
pub use bundlezip_logging::{
    HostLoggingLayer, LogCallback, LogCallbackManager, init_logging, init_logging_with_level,
    init_stderr_logging,
};

// Re-export common dependencies that hosts need
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use bundlezip::prelude::*;` to import commonly used types.
///
/// This includes:
/// - The hook: `BuildHook`, `ZipPackager`, `OutputAnnouncement`
/// - Build output: `BuildArtifact`, `ArtifactKind`, `Manifest`
/// - Options and results: `ArchiveOptions`, `EncryptionMethod`, `PackOutcome`, `PackError`, `PackResult`
pub mod prelude {
    pub use crate::{
        ArchiveOptions, ArtifactKind, BuildArtifact, BuildHook, CycleState, EncryptionMethod,
        LogLevel, Manifest, OutputAnnouncement, PackCompletion, PackError, PackOutcome,
        PackReport, PackResult, ZipPackager,
    };
}
