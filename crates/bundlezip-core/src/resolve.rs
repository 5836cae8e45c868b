//! Archive output path resolution

use crate::{ArchiveOptions, PackError, PackResult, PackageEnv};
use bundlezip_archive::ARCHIVE_EXTENSION;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Non-fatal configuration conflict found while resolving the output path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// Both `outputFile` and `outputDir` were set; the file wins
    OutputDirIgnored { output_dir: PathBuf },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::OutputDirIgnored { output_dir } => write!(
                f,
                "both `outputFile` and `outputDir` are set - `outputDir` ({}) has no effect",
                output_dir.display()
            ),
        }
    }
}

/// Result of [`resolve_output_path`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Absolute build output directory the path was resolved against
    pub output_directory: PathBuf,
    /// Absolute archive file path
    pub file: PathBuf,
    /// Conflicts that were recovered from
    pub warnings: Vec<ResolveWarning>,
}

/// Compute the absolute archive path.
///
/// - An explicit `output_file` wins; relative files are joined onto
///   `announced_dir`, and a simultaneous `output_dir` only yields a warning.
/// - Otherwise the archive is `<dir>/<name>[-<version>].zip`, where `dir` is
///   `output_dir` (created if missing) or `announced_dir`.
///
/// Relative directories are made absolute against the current directory.
pub fn resolve_output_path(
    options: &ArchiveOptions,
    announced_dir: &Path,
    env: &PackageEnv,
) -> PackResult<ResolvedOutput> {
    let output_directory = absolutize(announced_dir)?;

    if let Some(file) = &options.output_file {
        let warnings = options
            .output_dir
            .iter()
            .map(|dir| ResolveWarning::OutputDirIgnored {
                output_dir: dir.clone(),
            })
            .collect();
        let file = if file.is_absolute() {
            file.clone()
        } else {
            output_directory.join(file)
        };
        return Ok(ResolvedOutput {
            output_directory,
            file,
            warnings,
        });
    }

    let target_dir = match &options.output_dir {
        Some(dir) => {
            let dir = absolutize(dir)?;
            ensure_dir(&dir)?;
            dir
        }
        None => output_directory.clone(),
    };
    let file = target_dir.join(format!("{}.{ARCHIVE_EXTENSION}", env.basename()));

    Ok(ResolvedOutput {
        output_directory,
        file,
        warnings: Vec::new(),
    })
}

pub(crate) fn absolutize(path: &Path) -> PackResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::path::absolute(path)?)
    }
}

/// Create `dir` and its parents unless it already is a directory.
pub(crate) fn ensure_dir(dir: &Path) -> PackResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| PackError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::debug!(dir = %dir.display(), "created output directory");
    Ok(())
}
