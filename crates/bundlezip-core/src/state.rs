//! State carried from the output announcement to artifact packaging

use crate::lifecycle::{CycleState, CycleTracker};
use crate::resolve::{ResolveWarning, ResolvedOutput};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-cycle record written by the output announcement and read when
/// artifacts arrive
#[derive(Debug)]
pub struct PackagingState {
    output_directory: PathBuf,
    output_file_path: PathBuf,
    warnings: Vec<ResolveWarning>,
    tracker: Arc<CycleTracker>,
}

impl PackagingState {
    /// Start a cycle from a resolved output path
    pub fn announced(resolved: ResolvedOutput) -> Self {
        Self {
            output_directory: resolved.output_directory,
            output_file_path: resolved.file,
            warnings: resolved.warnings,
            tracker: Arc::new(CycleTracker::new(CycleState::Announced)),
        }
    }

    /// Absolute build output directory announced by the host
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Absolute archive path for this cycle
    pub fn output_file_path(&self) -> &Path {
        &self.output_file_path
    }

    /// Directory the archive is written into
    pub fn destination_dir(&self) -> &Path {
        self.output_file_path
            .parent()
            .unwrap_or(&self.output_directory)
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    pub fn state(&self) -> CycleState {
        self.tracker.state()
    }

    /// Whether this cycle's archive was written and closed
    pub fn archive_produced(&self) -> bool {
        matches!(self.state(), CycleState::Packaged | CycleState::Done)
    }

    pub(crate) fn tracker(&self) -> Arc<CycleTracker> {
        Arc::clone(&self.tracker)
    }
}
