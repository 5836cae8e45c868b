//! Build cycle state machine

use crate::{PackError, PackResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Packaging state of one build cycle
///
/// State transitions:
/// ```text
/// Idle → Announced → Writing → Packaged
///            ↑          │
///            │          └────→ Failed
///            └── (next cycle re-announces)
/// Done: a create-once packager already produced its archive (process-terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CycleState {
    /// No output directory announced yet
    #[default]
    Idle = 0,
    /// Output path resolved, waiting for artifacts
    Announced = 1,
    /// Archive is being streamed to disk
    Writing = 2,
    /// Archive written and closed
    Packaged = 3,
    /// Packaging failed for this cycle
    Failed = 4,
    /// Archive already produced once; later cycles are ignored
    Done = 5,
}

impl CycleState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CycleState::Idle,
            1 => CycleState::Announced,
            2 => CycleState::Writing,
            3 => CycleState::Packaged,
            4 => CycleState::Failed,
            _ => CycleState::Done,
        }
    }

    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: CycleState) -> bool {
        use CycleState::*;
        matches!(
            (self, target),
            // A new cycle may start from anything but a latched packager
            (Idle | Announced | Packaged | Failed, Announced)
                | (Announced, Writing)
                | (Writing, Packaged)
                | (Announced | Writing, Failed)
                | (Packaged, Done)
        )
    }

    /// Check if artifacts can be packaged in this state
    pub fn accepts_artifacts(&self) -> bool {
        matches!(self, CycleState::Announced)
    }

    /// Check if the cycle has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CycleState::Packaged | CycleState::Failed | CycleState::Done
        )
    }

    /// Get a human-readable description of this state
    pub fn description(&self) -> &'static str {
        match self {
            CycleState::Idle => "Waiting for the output directory",
            CycleState::Announced => "Output path resolved, waiting for artifacts",
            CycleState::Writing => "Archive is being written",
            CycleState::Packaged => "Archive written",
            CycleState::Failed => "Packaging failed",
            CycleState::Done => "Archive already created for this process",
        }
    }
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleState::Idle => write!(f, "Idle"),
            CycleState::Announced => write!(f, "Announced"),
            CycleState::Writing => write!(f, "Writing"),
            CycleState::Packaged => write!(f, "Packaged"),
            CycleState::Failed => write!(f, "Failed"),
            CycleState::Done => write!(f, "Done"),
        }
    }
}

/// Atomic holder for a cycle's state, shared with the streaming task
#[derive(Debug)]
pub struct CycleTracker {
    state: AtomicU8,
}

impl CycleTracker {
    pub fn new(state: CycleState) -> Self {
        Self {
            state: AtomicU8::new(state as u8),
        }
    }

    pub fn state(&self) -> CycleState {
        CycleState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Set state directly, bypassing transition validation
    pub fn set_state(&self, state: CycleState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&self, target: CycleState) -> PackResult<()> {
        let current = self.state();
        if !current.can_transition_to(target) {
            return Err(PackError::InvalidState {
                expected: format!("state that can transition to {target}"),
                actual: current.to_string(),
            });
        }
        self.state
            .compare_exchange(
                current as u8,
                target as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .map(|_| ())
            .map_err(|actual| PackError::InvalidState {
                expected: current.to_string(),
                actual: CycleState::from_u8(actual).to_string(),
            })
    }
}

impl Default for CycleTracker {
    fn default() -> Self {
        Self::new(CycleState::Idle)
    }
}

#[cfg(test)]
#[path = "lifecycle/lifecycle_tests.rs"]
mod lifecycle_tests;
