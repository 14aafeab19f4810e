use super::*;
use crate::{SolvedCube, TransportError};
use shared::domain::DEFAULT_CUBE;
use std::time::Duration;

const USER_CUBE: &str = "OBBOBRBYOGYYBOOBOGOBWBWYWWGBGRRRWOORYWYRYRYGWRGWGGWRYG";

fn store() -> PuzzleStateStore {
    PuzzleStateStore::new(CubeState::parse(DEFAULT_CUBE).expect("default"))
}

fn solved_outcome() -> SolveOutcome {
    SolveOutcome::Solved(SolvedCube {
        cube: CubeState::parse(DEFAULT_CUBE).expect("default"),
        result: SolveResult {
            moves: vec!["U".to_string(), "R'".to_string()],
            duration_ms: 12.5,
        },
    })
}

#[test]
fn starts_idle_on_default_cube() {
    let store = store();
    assert_eq!(store.cube().as_str(), DEFAULT_CUBE);
    assert_eq!(store.phase(), ControllerPhase::Idle);
    assert!(!store.alert().is_active());
    assert!(store.prior_cube().is_none());
    assert!(store.result().is_none());
    assert!(store.selected_color().is_none());
}

#[test]
fn validation_failure_raises_alert_and_keeps_cube() {
    let mut store = store();
    let err = store
        .apply_validation(Err(ValidationError::InvalidLength { actual: 3 }))
        .expect_err("invalid");

    assert_eq!(store.cube().as_str(), DEFAULT_CUBE);
    assert_eq!(store.alert().message(), Some(err.message().as_str()));
    assert_eq!(store.phase(), ControllerPhase::AlertShown);
}

#[test]
fn newer_alert_replaces_older_and_success_clears_it() {
    let mut store = store();
    let _ = store.apply_validation(Err(ValidationError::InvalidLength { actual: 3 }));
    let _ = store.apply_validation(Err(ValidationError::InvalidCharacter {
        character: 'x',
        position: 0,
    }));
    assert!(store
        .alert()
        .message()
        .expect("active")
        .starts_with("The cube string argument contains invalid characters"));

    let cube = CubeState::parse(USER_CUBE).expect("valid");
    store.apply_validation(Ok(cube.clone())).expect("valid");
    assert_eq!(store.cube(), &cube);
    assert_eq!(store.alert().message(), None);
    assert_eq!(store.phase(), ControllerPhase::Idle);
}

#[test]
fn begin_solve_refused_while_alert_active() {
    let mut store = store();
    let _ = store.apply_validation(Err(ValidationError::InvalidLength { actual: 3 }));
    let before = store.snapshot();

    assert!(store.begin_solve().is_none());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn begin_solve_refused_while_in_flight() {
    let mut store = store();
    let first = store.begin_solve().expect("dispatch");
    assert_eq!(store.phase(), ControllerPhase::Loading);

    assert!(store.begin_solve().is_none());
    assert!(store.settle_solve(&first, &solved_outcome()));
}

#[test]
fn success_records_prior_cube_and_result() {
    let mut store = store();
    store
        .apply_validation(Ok(CubeState::parse(USER_CUBE).expect("valid")))
        .expect("valid");
    let ticket = store.begin_solve().expect("dispatch");

    assert!(store.settle_solve(&ticket, &solved_outcome()));

    assert_eq!(store.prior_cube().map(CubeState::as_str), Some(USER_CUBE));
    assert_eq!(store.cube().as_str(), DEFAULT_CUBE);
    assert_eq!(
        store.result(),
        Some(&SolveResult {
            moves: vec!["U".to_string(), "R'".to_string()],
            duration_ms: 12.5,
        })
    );
    assert!(!store.in_flight());
    assert_eq!(store.phase(), ControllerPhase::Idle);
}

#[test]
fn application_error_keeps_cube_prior_and_result() {
    let mut store = store();
    let ticket = store.begin_solve().expect("dispatch");
    let before = store.snapshot();

    assert!(store.settle_solve(
        &ticket,
        &SolveOutcome::ApplicationError("unsolvable".to_string())
    ));

    assert_eq!(store.alert().message(), Some("unsolvable"));
    assert_eq!(store.cube(), &before.cube);
    assert_eq!(store.prior_cube(), before.prior_cube.as_ref());
    assert_eq!(store.result(), before.result.as_ref());
    assert!(!store.in_flight());
    assert_eq!(store.phase(), ControllerPhase::AlertShown);
}

#[test]
fn transport_error_uses_fixed_message() {
    let mut store = store();
    let ticket = store.begin_solve().expect("dispatch");

    assert!(store.settle_solve(
        &ticket,
        &SolveOutcome::TransportError(TransportError::TimedOut(Duration::from_secs(1)))
    ));

    assert_eq!(store.alert().message(), Some(TRANSPORT_FAILURE_MESSAGE));
    assert!(!store.in_flight());
}

#[test]
fn abandoned_ticket_cannot_settle() {
    let mut store = store();
    let ticket = store.begin_solve().expect("dispatch");

    assert!(store.abandon_solve());
    assert!(!store.abandon_solve());
    assert!(!store.settle_solve(&ticket, &solved_outcome()));

    assert!(store.prior_cube().is_none());
    assert!(store.result().is_none());
    assert_eq!(store.phase(), ControllerPhase::Idle);
}

#[test]
fn edit_during_flight_alert_is_cleared_by_success() {
    let mut store = store();
    let ticket = store.begin_solve().expect("dispatch");
    let _ = store.apply_validation(Err(ValidationError::InvalidLength { actual: 1 }));
    assert_eq!(store.phase(), ControllerPhase::Loading);

    assert!(store.settle_solve(&ticket, &solved_outcome()));
    assert!(!store.alert().is_active());
    assert_eq!(store.prior_cube().map(CubeState::as_str), Some(DEFAULT_CUBE));
}
