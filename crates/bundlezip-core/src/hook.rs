//! Build lifecycle hook and announcement types

use crate::resolve::absolutize;
use crate::{Manifest, PackCompletion, PackResult};
use std::path::{Path, PathBuf};

/// Output location announced by the host before any file is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputAnnouncement {
    /// Output directory
    pub dir: Option<PathBuf>,
    /// Single output file, when the host writes one bundle file
    pub file: Option<PathBuf>,
}

impl OutputAnnouncement {
    /// Announce an output directory
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            file: None,
        }
    }

    /// Announce a single output file
    pub fn for_file(file: impl Into<PathBuf>) -> Self {
        Self {
            dir: None,
            file: Some(file.into()),
        }
    }

    /// Absolute output directory
    ///
    /// `dir` wins, then the parent of `file`, then the current directory.
    pub fn output_dir(&self) -> PackResult<PathBuf> {
        if let Some(dir) = &self.dir {
            return absolutize(dir);
        }
        if let Some(parent) = self
            .file
            .as_deref()
            .and_then(Path::parent)
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            return absolutize(parent);
        }
        Ok(std::env::current_dir()?)
    }
}

/// Entry points a build pipeline calls on a packaging collaborator
///
/// Within one build cycle the host calls [`output_announced`] before
/// [`artifacts_ready`], and does not start the next cycle until the returned
/// completion has settled.
///
/// [`output_announced`]: BuildHook::output_announced
/// [`artifacts_ready`]: BuildHook::artifacts_ready
///
/// # Example
///
/// ```ignore
/// use bundlezip_core::{BuildArtifact, BuildHook, Manifest, OutputAnnouncement};
///
/// async fn run_cycle(hook: &mut dyn BuildHook) -> bundlezip_core::PackResult<()> {
///     hook.output_announced(&OutputAnnouncement::for_dir("dist"))?;
///     let manifest = Manifest::new().with(BuildArtifact::code("main.js", "console.log(1)"))?;
///     hook.artifacts_ready(manifest).await?;
///     Ok(())
/// }
/// ```
pub trait BuildHook: Send {
    /// Name the hook is registered under in the pipeline
    fn name(&self) -> &'static str;

    /// Entry point A: the output location is known, no files exist yet
    fn output_announced(&mut self, announcement: &OutputAnnouncement) -> PackResult<()>;

    /// Entry point B: the finalized manifest is available
    fn artifacts_ready(&mut self, manifest: Manifest) -> PackCompletion;
}
