//! Completion signal returned to the host once artifacts are handed over

use crate::{PackError, PackResult};
use bundlezip_archive::{ArchiveCompletion, ArchiveError};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Details of a written archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    /// Absolute archive path
    pub path: PathBuf,
    /// Number of entries, including `.map` companions
    pub entries: usize,
    /// Archive size in bytes
    pub bytes_written: u64,
}

/// What a packaging cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// An archive was written
    Created(PackReport),
    /// Nothing was written because the archive was already created once
    Skipped,
}

impl PackOutcome {
    pub fn report(&self) -> Option<&PackReport> {
        match self {
            PackOutcome::Created(report) => Some(report),
            PackOutcome::Skipped => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, PackOutcome::Created(_))
    }
}

/// Future the host awaits before it considers the build finished
///
/// Dropping it does not stop the archive write.
#[must_use = "the archive may still be writing; await the completion to observe the result"]
#[derive(Debug)]
pub struct PackCompletion {
    state: CompletionState,
}

#[derive(Debug)]
enum CompletionState {
    Settled(Option<PackResult<PackOutcome>>),
    Writing {
        path: PathBuf,
        archive: ArchiveCompletion,
    },
}

impl PackCompletion {
    /// Already resolved with [`PackOutcome::Skipped`]
    pub fn skipped() -> Self {
        Self::settled(Ok(PackOutcome::Skipped))
    }

    /// Already rejected with `err`
    pub fn failed(err: PackError) -> Self {
        Self::settled(Err(err))
    }

    fn settled(result: PackResult<PackOutcome>) -> Self {
        Self {
            state: CompletionState::Settled(Some(result)),
        }
    }

    pub(crate) fn writing(path: PathBuf, archive: ArchiveCompletion) -> Self {
        Self {
            state: CompletionState::Writing { path, archive },
        }
    }

    /// Check whether the result is available without waiting
    pub fn is_settled(&self) -> bool {
        match &self.state {
            CompletionState::Settled(_) => true,
            CompletionState::Writing { archive, .. } => archive.is_settled(),
        }
    }
}

impl Future for PackCompletion {
    type Output = PackResult<PackOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = match &mut self.state {
            CompletionState::Settled(result) => {
                return Poll::Ready(
                    result
                        .take()
                        .unwrap_or(Err(PackError::Archive(ArchiveError::CompletionConsumed))),
                );
            }
            CompletionState::Writing { path, archive } => match Pin::new(archive).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(outcome)) => Ok(PackOutcome::Created(PackReport {
                    path: path.clone(),
                    entries: outcome.entries,
                    bytes_written: outcome.bytes_written,
                })),
                Poll::Ready(Err(source)) => Err(PackError::Write {
                    path: path.clone(),
                    source,
                }),
            },
        };

        self.state = CompletionState::Settled(None);
        Poll::Ready(result)
    }
}
