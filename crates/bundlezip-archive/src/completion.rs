//! Completion signal for archive writes.

use crate::{ArchiveError, ArchiveResult};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Summary of a finished archive write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Number of entries written.
    pub entries: usize,
    /// Total archive size in bytes.
    pub bytes_written: u64,
}

/// Future that resolves once the archive sink has been flushed and closed.
///
/// Dropping the completion does not cancel the write; the background task
/// runs to completion or failure either way.
#[must_use = "the archive may still be writing; await the completion to observe the result"]
#[derive(Debug)]
pub struct ArchiveCompletion {
    state: CompletionState,
}

#[derive(Debug)]
enum CompletionState {
    Settled(Option<ArchiveResult<ArchiveOutcome>>),
    Streaming(JoinHandle<ArchiveResult<ArchiveOutcome>>),
}

impl ArchiveCompletion {
    /// Create a completion that is already resolved.
    pub fn settled(result: ArchiveResult<ArchiveOutcome>) -> Self {
        Self {
            state: CompletionState::Settled(Some(result)),
        }
    }

    pub(crate) fn streaming(handle: JoinHandle<ArchiveResult<ArchiveOutcome>>) -> Self {
        Self {
            state: CompletionState::Streaming(handle),
        }
    }

    /// Check whether the result is available without waiting.
    pub fn is_settled(&self) -> bool {
        match &self.state {
            CompletionState::Settled(_) => true,
            CompletionState::Streaming(handle) => handle.is_finished(),
        }
    }
}

impl Future for ArchiveCompletion {
    type Output = ArchiveResult<ArchiveOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let polled = match &mut self.state {
            CompletionState::Settled(result) => {
                return Poll::Ready(result.take().unwrap_or(Err(ArchiveError::CompletionConsumed)));
            }
            CompletionState::Streaming(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(result)) => result,
                Poll::Ready(Err(join_err)) => Err(ArchiveError::TaskFailed(join_err.to_string())),
            },
        };

        self.state = CompletionState::Settled(None);
        Poll::Ready(polled)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[tokio::test]
    async fn ArchiveCompletion___settled___resolves_immediately() {
        let outcome = ArchiveOutcome {
            entries: 2,
            bytes_written: 128,
        };
        let completion = ArchiveCompletion::settled(Ok(outcome));
        assert!(completion.is_settled());

        let result = completion.await.unwrap();

        assert_eq!(result, outcome);
    }

    #[tokio::test]
    async fn ArchiveCompletion___streaming_task_panics___reports_task_failed() {
        let handle = tokio::task::spawn_blocking(|| -> ArchiveResult<ArchiveOutcome> {
            panic!("sink exploded");
        });
        let completion = ArchiveCompletion::streaming(handle);

        let result = completion.await;

        assert!(matches!(result, Err(ArchiveError::TaskFailed(_))));
    }

    #[tokio::test]
    async fn ArchiveCompletion___polled_after_ready___reports_consumed() {
        let mut completion = ArchiveCompletion::settled(Ok(ArchiveOutcome {
            entries: 0,
            bytes_written: 22,
        }));

        (&mut completion).await.unwrap();
        let second = (&mut completion).await;

        assert!(matches!(second, Err(ArchiveError::CompletionConsumed)));
    }
}
