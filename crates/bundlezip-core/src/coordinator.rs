//! Lifecycle coordinator wiring the build hook to the archive writer

use crate::hook::{BuildHook, OutputAnnouncement};
use crate::lifecycle::{CycleState, CycleTracker};
use crate::resolve::{ensure_dir, resolve_output_path};
use crate::state::PackagingState;
use crate::{ArchiveOptions, Manifest, PackCompletion, PackError, PackResult, PackageEnv};
use bundlezip_archive::{ArchiveError, ArchiveWriter, EntrySource};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Name the packager registers under in the build pipeline
pub const PACKAGER_NAME: &str = "archiver-zip";

/// Packages every build cycle's artifacts into a single zip archive
///
/// The host calls [`BuildHook::output_announced`] and then
/// [`BuildHook::artifacts_ready`] once per cycle. With `create_once` set, only
/// the first successful cycle writes an archive and later cycles are skipped.
pub struct ZipPackager {
    options: ArchiveOptions,
    env: PackageEnv,
    state: Option<PackagingState>,
    created: Arc<AtomicBool>,
}

impl ZipPackager {
    /// Create a packager reading the package name and version from the process environment
    pub fn new(options: ArchiveOptions) -> Self {
        Self::with_env(options, PackageEnv::from_process_env())
    }

    /// Create a packager with an explicit package environment
    pub fn with_env(options: ArchiveOptions, env: PackageEnv) -> Self {
        Self {
            options,
            env,
            state: None,
            created: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    pub fn env(&self) -> &PackageEnv {
        &self.env
    }

    /// Current cycle state; `Idle` before the first announcement
    pub fn state(&self) -> CycleState {
        self.state
            .as_ref()
            .map_or(CycleState::Idle, PackagingState::state)
    }

    /// Archive path of the current cycle, once announced
    pub fn output_path(&self) -> Option<&Path> {
        self.state.as_ref().map(PackagingState::output_file_path)
    }

    pub fn packaging_state(&self) -> Option<&PackagingState> {
        self.state.as_ref()
    }

    /// Whether any cycle of this packager has written an archive
    pub fn is_created(&self) -> bool {
        self.created.load(Ordering::SeqCst)
    }

    fn skip_cycle(&self) -> bool {
        self.options.create_once && self.is_created()
    }

    fn announce(&mut self, announcement: &OutputAnnouncement) -> PackResult<()> {
        if self.skip_cycle() {
            tracing::debug!("archive already created, ignoring output announcement");
            return Ok(());
        }

        self.state = None;
        let announced_dir = announcement.output_dir()?;
        let resolved = resolve_output_path(&self.options, &announced_dir, &self.env)?;
        for warning in &resolved.warnings {
            tracing::warn!("{}: {}", PACKAGER_NAME, warning);
        }

        tracing::debug!(path = %resolved.file.display(), "resolved archive path");
        self.state = Some(PackagingState::announced(resolved));
        Ok(())
    }

    fn package(&self, manifest: Manifest) -> PackResult<PackCompletion> {
        if self.skip_cycle() {
            tracing::debug!("archive already created, skipping");
            return Ok(PackCompletion::skipped());
        }

        let state = self.state.as_ref().ok_or_else(|| PackError::InvalidState {
            expected: CycleState::Announced.to_string(),
            actual: CycleState::Idle.to_string(),
        })?;

        let current = state.state();
        if !current.accepts_artifacts() {
            return Err(PackError::InvalidState {
                expected: CycleState::Announced.to_string(),
                actual: current.to_string(),
            });
        }

        let tracker = state.tracker();
        tracker.transition_to(CycleState::Writing)?;

        match self.start_write(state, manifest, Arc::clone(&tracker)) {
            Ok(completion) => Ok(completion),
            Err(e) => {
                tracker.set_state(CycleState::Failed);
                Err(e)
            }
        }
    }

    fn start_write(
        &self,
        state: &PackagingState,
        manifest: Manifest,
        tracker: Arc<CycleTracker>,
    ) -> PackResult<PackCompletion> {
        ensure_dir(state.destination_dir())?;

        let mut writer = ArchiveWriter::create(self.options.format_options())?;
        for artifact in manifest {
            if self.options.excludes(&artifact) {
                tracing::debug!(name = artifact.name(), "artifact excluded by filter");
                continue;
            }

            let map_name = artifact.map_entry_name();
            let (name, source, source_map) = artifact.into_parts();
            writer.append(name, source.into());
            if let (Some(map_name), Some(map)) = (map_name, source_map) {
                writer.append(map_name, EntrySource::Bytes(map));
            }
        }

        let path = state.output_file_path().to_path_buf();
        let file = File::create(&path).map_err(|e| PackError::Write {
            path: path.clone(),
            source: ArchiveError::Io(e),
        })?;

        let created = Arc::clone(&self.created);
        let create_once = self.options.create_once;
        let settled_path = path.clone();
        let archive = writer.finalize(BufWriter::new(file), move |result| match result {
            Ok(outcome) => {
                tracker.set_state(CycleState::Packaged);
                if create_once {
                    tracker.set_state(CycleState::Done);
                }
                created.store(true, Ordering::SeqCst);
                tracing::info!(
                    entries = outcome.entries,
                    bytes = outcome.bytes_written,
                    "created zip file: {}",
                    settled_path.display()
                );
            }
            Err(e) => {
                tracker.set_state(CycleState::Failed);
                tracing::error!("Failed to write zip file {}: {}", settled_path.display(), e);
            }
        });

        Ok(PackCompletion::writing(path, archive))
    }
}

impl BuildHook for ZipPackager {
    fn name(&self) -> &'static str {
        PACKAGER_NAME
    }

    fn output_announced(&mut self, announcement: &OutputAnnouncement) -> PackResult<()> {
        self.announce(announcement)
    }

    fn artifacts_ready(&mut self, manifest: Manifest) -> PackCompletion {
        self.package(manifest).unwrap_or_else(|e| {
            tracing::error!("{}: {}", PACKAGER_NAME, e);
            PackCompletion::failed(e)
        })
    }
}

impl std::fmt::Debug for ZipPackager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipPackager")
            .field("options", &self.options)
            .field("env", &self.env)
            .field("state", &self.state())
            .field("created", &self.is_created())
            .finish()
    }
}
