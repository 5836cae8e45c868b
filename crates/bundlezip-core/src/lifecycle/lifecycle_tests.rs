#![allow(non_snake_case)]

use super::*;

#[test]
fn CycleState___default___is_idle() {
    assert_eq!(CycleState::default(), CycleState::Idle);
}

#[test]
fn CycleState___announced___accepts_artifacts() {
    assert!(CycleState::Announced.accepts_artifacts());
}

#[test]
fn CycleState___other_states___reject_artifacts() {
    let states = [
        CycleState::Idle,
        CycleState::Writing,
        CycleState::Packaged,
        CycleState::Failed,
        CycleState::Done,
    ];

    for state in states {
        assert!(
            !state.accepts_artifacts(),
            "{:?} should not accept artifacts",
            state
        );
    }
}

#[test]
fn CycleState___terminal_states___reported() {
    assert!(CycleState::Packaged.is_terminal());
    assert!(CycleState::Failed.is_terminal());
    assert!(CycleState::Done.is_terminal());
    assert!(!CycleState::Idle.is_terminal());
    assert!(!CycleState::Announced.is_terminal());
    assert!(!CycleState::Writing.is_terminal());
}

#[test]
fn CycleState___done___cannot_restart() {
    assert!(!CycleState::Done.can_transition_to(CycleState::Announced));
}

#[test]
fn CycleState___serde___uses_snake_case() {
    let json = serde_json::to_string(&CycleState::Announced).unwrap();

    assert_eq!(json, "\"announced\"");
}

#[test]
fn CycleState___description___not_empty() {
    assert!(!CycleState::Writing.description().is_empty());
}

#[test]
fn CycleTracker___new___holds_initial_state() {
    let tracker = CycleTracker::new(CycleState::Announced);

    assert_eq!(tracker.state(), CycleState::Announced);
}

#[test]
fn CycleTracker___transition_to_valid___updates_state() {
    let tracker = CycleTracker::new(CycleState::Announced);

    tracker.transition_to(CycleState::Writing).unwrap();

    assert_eq!(tracker.state(), CycleState::Writing);
}

#[test]
fn CycleTracker___transition_to_invalid___returns_invalid_state() {
    let tracker = CycleTracker::new(CycleState::Idle);

    let result = tracker.transition_to(CycleState::Writing);

    assert!(matches!(result, Err(PackError::InvalidState { .. })));
    assert_eq!(tracker.state(), CycleState::Idle);
}

#[test]
fn CycleTracker___set_state___bypasses_validation() {
    let tracker = CycleTracker::default();

    tracker.set_state(CycleState::Failed);

    assert_eq!(tracker.state(), CycleState::Failed);
}
