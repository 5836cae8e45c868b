//! Archive creation.
//!
//! The [`ArchiveWriter`] collects named entries and streams them into a zip
//! container once [`ArchiveWriter::finalize`] is called.

use crate::completion::{ArchiveCompletion, ArchiveOutcome};
use crate::registry::{
    EncryptedFormatRegistrar, FormatDescriptor, ZIP_ENCRYPTABLE_FORMAT, ZIP_FORMAT,
};
use crate::sink::ArchiveSink;
use crate::{ArchiveError, ArchiveResult};
use chrono::{Datelike, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use zip::unstable::write::FileOptionsExt;
use zip::write::{FileOptions, SimpleFileOptions};
use zip::{AesMode, CompressionMethod, DateTime, ZipWriter};

/// Encryption scheme used when a password is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionMethod {
    /// Traditional PKWARE encryption, readable by most extractors.
    #[default]
    ZipCrypto,
    /// WinZip AES-256.
    Aes256,
}

/// Format settings for a new archive.
///
/// Every flag is optional; unset flags keep the encoder defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Archive comment.
    pub comment: Option<String>,
    /// Password; switches the archive to the encrypted format.
    pub password: Option<String>,
    /// Scheme used when `password` is set.
    pub encryption: EncryptionMethod,
    /// Stamp entries with local time instead of UTC (default: local).
    pub force_local_time: Option<bool>,
    /// Write ZIP64 headers for every entry.
    pub force_zip64: Option<bool>,
    /// Prepend `/` to every entry name.
    pub name_prepend_slash: Option<bool>,
    /// Store entries uncompressed.
    pub store: Option<bool>,
    /// Deflate level; ignored when storing.
    pub compression_level: Option<i64>,
}

/// Content of a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// In-memory payload.
    Bytes(Vec<u8>),
    /// File on disk, streamed into the archive at finalize time.
    File(PathBuf),
}

struct PendingEntry {
    name: String,
    source: EntrySource,
}

/// Builder for a single zip archive.
///
/// # Example
///
/// ```no_run
/// use bundlezip_archive::{ArchiveWriter, EntrySource, FormatOptions};
/// use std::fs::File;
///
/// let mut writer = ArchiveWriter::create(FormatOptions::default())?;
/// writer.append("main.js", EntrySource::Bytes(b"console.log(1)".to_vec()));
/// writer.write_to(File::create("dist/bundle.zip")?)?;
/// # Ok::<(), bundlezip_archive::ArchiveError>(())
/// ```
pub struct ArchiveWriter {
    options: FormatOptions,
    format: FormatDescriptor,
    entries: Vec<PendingEntry>,
}

impl ArchiveWriter {
    /// Open a new archive using the process-wide format registry.
    ///
    /// If a password is configured the encrypted format is registered first.
    pub fn create(options: FormatOptions) -> ArchiveResult<Self> {
        Self::create_with(options, EncryptedFormatRegistrar::global())
    }

    /// Open a new archive using a specific registrar and its registry.
    pub fn create_with(
        options: FormatOptions,
        registrar: &EncryptedFormatRegistrar<'_>,
    ) -> ArchiveResult<Self> {
        let format_name = if options.password.is_some() {
            registrar.ensure_registered()?;
            ZIP_ENCRYPTABLE_FORMAT
        } else {
            ZIP_FORMAT
        };

        let format = registrar
            .registry()
            .lookup(format_name)
            .ok_or_else(|| ArchiveError::FormatNotRegistered(format_name.to_string()))?;

        tracing::debug!(format = format.name, "opened archive");

        Ok(Self {
            options,
            format,
            entries: Vec::new(),
        })
    }

    /// The format this archive is written in.
    #[must_use]
    pub fn format(&self) -> FormatDescriptor {
        self.format
    }

    /// Queue a named entry.
    pub fn append(&mut self, name: impl Into<String>, source: EntrySource) -> &mut Self {
        let name = name.into();
        let name = if self.options.name_prepend_slash.unwrap_or(false) {
            format!("/{name}")
        } else {
            name
        };
        self.entries.push(PendingEntry { name, source });
        self
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the queued entries, in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Stream the archive to `sink` in the background.
    ///
    /// The write runs on a tokio blocking thread when called inside a
    /// runtime, and inline otherwise. `on_settled` sees the result on the
    /// writing thread before the completion resolves.
    pub fn finalize<S, F>(self, sink: S, on_settled: F) -> ArchiveCompletion
    where
        S: ArchiveSink,
        F: FnOnce(&ArchiveResult<ArchiveOutcome>) + Send + 'static,
    {
        let job = move || {
            let result = self.write_to(sink);
            on_settled(&result);
            result
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => ArchiveCompletion::streaming(handle.spawn_blocking(job)),
            Err(_) => {
                tracing::debug!("no async runtime, writing archive inline");
                ArchiveCompletion::settled(job())
            }
        }
    }

    /// Write the archive to `sink` on the current thread and close it.
    pub fn write_to<S: ArchiveSink>(self, sink: S) -> ArchiveResult<ArchiveOutcome> {
        let options = self.entry_options(self.timestamp())?;

        let mut zip = ZipWriter::new(sink);
        if let Some(comment) = &self.options.comment {
            zip.set_comment(comment.clone());
        }

        for entry in &self.entries {
            match &entry.source {
                EntrySource::Bytes(bytes) => {
                    zip.start_file(entry.name.as_str(), options.clone())?;
                    zip.write_all(bytes)?;
                }
                EntrySource::File(path) => {
                    let mut file = File::open(path).map_err(|source| {
                        ArchiveError::SourceNotFound {
                            path: path.clone(),
                            source,
                        }
                    })?;
                    zip.start_file(entry.name.as_str(), options.clone())?;
                    io::copy(&mut file, &mut zip)?;
                }
            }
            tracing::trace!(entry = %entry.name, "added archive entry");
        }

        let mut sink = zip.finish()?;
        let bytes_written = sink.stream_position()?;
        sink.close()?;

        Ok(ArchiveOutcome {
            entries: self.entries.len(),
            bytes_written,
        })
    }

    fn entry_options(&self, modified: DateTime) -> ArchiveResult<FileOptions<'_, ()>> {
        let store = self.options.store.unwrap_or(false);
        let (method, level) = if store {
            (CompressionMethod::Stored, None)
        } else {
            (CompressionMethod::Deflated, self.options.compression_level)
        };

        let base = SimpleFileOptions::default()
            .compression_method(method)
            .compression_level(level)
            .last_modified_time(modified)
            .large_file(self.options.force_zip64.unwrap_or(false))
            .unix_permissions(0o644);

        let options = match self.options.password.as_deref() {
            Some(password) => match self.options.encryption {
                EncryptionMethod::ZipCrypto => {
                    base.with_deprecated_encryption(password.as_bytes())?
                }
                EncryptionMethod::Aes256 => base.with_aes_encryption(AesMode::Aes256, password),
            },
            None => base,
        };
        Ok(options)
    }

    /// Modification time shared by every entry of this archive.
    fn timestamp(&self) -> DateTime {
        let now = if self.options.force_local_time.unwrap_or(true) {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        };
        to_zip_datetime(now)
    }
}

/// Convert to the DOS timestamp zip stores; out-of-range dates fall back to
/// the zip epoch (1980-01-01).
fn to_zip_datetime(time: NaiveDateTime) -> DateTime {
    let year = u16::try_from(time.year()).unwrap_or(1980);
    DateTime::from_date_and_time(
        year,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .unwrap_or_default()
}
