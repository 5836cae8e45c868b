//! Archive packaging options

use crate::{BuildArtifact, PackError, PackResult};
use bundlezip_archive::{EncryptionMethod, FormatOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Predicate deciding whether an artifact is left out of the archive
///
/// Returning `true` excludes the artifact.
#[derive(Clone)]
pub struct FileFilter(Arc<dyn Fn(&BuildArtifact) -> bool + Send + Sync>);

impl FileFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&BuildArtifact) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Check whether `artifact` should be skipped
    pub fn excludes(&self, artifact: &BuildArtifact) -> bool {
        (self.0)(artifact)
    }
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FileFilter(..)")
    }
}

/// Options controlling where and how the archive is written
///
/// Loaded once at construction and never mutated by the packager.
/// Keys are camelCase in JSON and TOML; `file` and `dir` are accepted as
/// aliases for `outputFile` and `outputDir`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveOptions {
    /// Archive file; relative paths resolve against the announced output directory
    #[serde(default, alias = "file", skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    /// Directory for the archive; ignored when `output_file` is set
    #[serde(default, alias = "dir", skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Password protecting every entry
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Encryption scheme used with `password`
    #[serde(default)]
    pub encryption: EncryptionMethod,

    /// Archive comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Stamp entries with local time instead of UTC
    #[serde(default = "default_force_local_time")]
    pub force_local_time: bool,

    /// Write ZIP64 headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_zip64: Option<bool>,

    /// Prepend `/` to entry names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prepend_slash: Option<bool>,

    /// Store entries without compression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,

    /// Deflate level (default: 9)
    #[serde(default = "default_compression_level")]
    pub compression_level: Option<i64>,

    /// Produce an archive only for the first build cycle in this process
    #[serde(default)]
    pub create_once: bool,

    /// Artifacts for which this returns `true` are not packaged
    #[serde(skip)]
    pub filter_file: Option<FileFilter>,
}

fn default_force_local_time() -> bool {
    true
}

fn default_compression_level() -> Option<i64> {
    Some(9)
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            output_file: None,
            output_dir: None,
            password: None,
            encryption: EncryptionMethod::default(),
            comment: None,
            force_local_time: default_force_local_time(),
            force_zip64: None,
            name_prepend_slash: None,
            store: None,
            compression_level: default_compression_level(),
            create_once: false,
            filter_file: None,
        }
    }
}

impl fmt::Debug for ArchiveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveOptions")
            .field("output_file", &self.output_file)
            .field("output_dir", &self.output_dir)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("encryption", &self.encryption)
            .field("comment", &self.comment)
            .field("force_local_time", &self.force_local_time)
            .field("force_zip64", &self.force_zip64)
            .field("name_prepend_slash", &self.name_prepend_slash)
            .field("store", &self.store)
            .field("compression_level", &self.compression_level)
            .field("create_once", &self.create_once)
            .field("filter_file", &self.filter_file)
            .finish()
    }
}

impl ArchiveOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON bytes; empty input yields defaults
    pub fn from_json(bytes: &[u8]) -> PackResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse options from a TOML document
    pub fn from_toml(text: &str) -> PackResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a `.json` or `.toml` file
    pub fn from_file(path: impl AsRef<Path>) -> PackResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("toml") => {
                let text = String::from_utf8(contents)
                    .map_err(|e| PackError::Config(format!("{}: {e}", path.display())))?;
                Self::from_toml(&text)
            }
            _ => Err(PackError::Config(format!(
                "unsupported options file: {}",
                path.display()
            ))),
        }
    }

    pub fn with_output_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(file.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_encryption(mut self, encryption: EncryptionMethod) -> Self {
        self.encryption = encryption;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_force_local_time(mut self, force_local_time: bool) -> Self {
        self.force_local_time = force_local_time;
        self
    }

    pub fn with_force_zip64(mut self, force_zip64: bool) -> Self {
        self.force_zip64 = Some(force_zip64);
        self
    }

    pub fn with_name_prepend_slash(mut self, prepend: bool) -> Self {
        self.name_prepend_slash = Some(prepend);
        self
    }

    pub fn with_store(mut self, store: bool) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn with_create_once(mut self, create_once: bool) -> Self {
        self.create_once = create_once;
        self
    }

    /// Exclude artifacts for which `predicate` returns `true`
    pub fn with_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&BuildArtifact) -> bool + Send + Sync + 'static,
    {
        self.filter_file = Some(FileFilter::new(predicate));
        self
    }

    /// Check whether `artifact` is excluded by the configured filter
    pub fn excludes(&self, artifact: &BuildArtifact) -> bool {
        self.filter_file
            .as_ref()
            .is_some_and(|filter| filter.excludes(artifact))
    }

    /// Format settings handed to the archive writer
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            comment: self.comment.clone(),
            password: self.password.clone().filter(|p| !p.is_empty()),
            encryption: self.encryption,
            force_local_time: Some(self.force_local_time),
            force_zip64: self.force_zip64,
            name_prepend_slash: self.name_prepend_slash,
            store: self.store,
            compression_level: self.compression_level,
        }
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
