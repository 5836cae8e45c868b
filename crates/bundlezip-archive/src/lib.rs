//! Zip archive writer for bundlezip
//!
//! This crate wraps the `zip` encoder behind a small capability:
//! open an archive with a set of [`FormatOptions`], append named entries,
//! then finalize to an [`ArchiveSink`] and await the returned
//! [`ArchiveCompletion`].
//!
//! Password-protected archives use the `zip-encryptable` format, which is
//! registered on first use through [`EncryptedFormatRegistrar`].
//!
//! # Example
//!
//! ```no_run
//! use bundlezip_archive::{ArchiveWriter, EntrySource, FormatOptions};
//! use std::fs::File;
//!
//! # async fn run() -> Result<(), bundlezip_archive::ArchiveError> {
//! let options = FormatOptions {
//!     password: Some("s3cret".to_string()),
//!     ..FormatOptions::default()
//! };
//! let mut writer = ArchiveWriter::create(options)?;
//! writer
//!     .append("main.js", EntrySource::Bytes(b"console.log(1)".to_vec()))
//!     .append("logo.png", EntrySource::File("dist/logo.png".into()));
//!
//! let outcome = writer
//!     .finalize(File::create("dist/bundle.zip")?, |_| {})
//!     .await?;
//! println!("wrote {} entries", outcome.entries);
//! # Ok(())
//! # }
//! ```

mod completion;
mod error;
mod sink;

pub mod registry;
pub mod writer;

pub use completion::{ArchiveCompletion, ArchiveOutcome};
pub use error::ArchiveError;
pub use registry::{
    EncryptedFormatRegistrar, FormatDescriptor, FormatRegistry, ZIP_ENCRYPTABLE_FORMAT,
    ZIP_FORMAT, ensure_encrypted_format_registered,
};
pub use sink::ArchiveSink;
pub use writer::{ArchiveWriter, EncryptionMethod, EntrySource, FormatOptions};

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Archive file extension.
pub const ARCHIVE_EXTENSION: &str = "zip";
