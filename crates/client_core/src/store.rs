//! Single owned aggregate for everything the UI renders.

use shared::{
    domain::{CubeState, Facelet},
    error::ValidationError,
};

use crate::SolveOutcome;

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Unable to connect to the server.";

/// The one user-visible error slot. A new alert replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alert {
    active: bool,
    message: String,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Message of the active alert, `None` once cleared.
    pub fn message(&self) -> Option<&str> {
        self.active.then_some(self.message.as_str())
    }

    fn raise(&mut self, message: impl Into<String>) {
        self.active = true;
        self.message = message.into();
    }

    fn clear(&mut self) {
        self.active = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Move tokens in application order.
    pub moves: Vec<String>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Idle,
    Loading,
    AlertShown,
}

/// Read-only copy of the store handed to presentation code.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleSnapshot {
    pub cube: CubeState,
    pub prior_cube: Option<CubeState>,
    pub selected_color: Option<Facelet>,
    pub alert: Alert,
    pub in_flight: bool,
    pub result: Option<SolveResult>,
    pub phase: ControllerPhase,
}

/// Issued when a request is dispatched; settling requires the matching
/// generation so a cancelled request cannot write late.
#[derive(Debug, Clone)]
pub(crate) struct SolveTicket {
    pub generation: u64,
    pub prior: CubeState,
}

#[derive(Debug, Clone)]
pub struct PuzzleStateStore {
    cube: CubeState,
    default_cube: CubeState,
    prior_cube: Option<CubeState>,
    selected_color: Option<Facelet>,
    alert: Alert,
    in_flight: bool,
    generation: u64,
    result: Option<SolveResult>,
}

impl PuzzleStateStore {
    pub fn new(default_cube: CubeState) -> Self {
        Self {
            cube: default_cube.clone(),
            default_cube,
            prior_cube: None,
            selected_color: None,
            alert: Alert::default(),
            in_flight: false,
            generation: 0,
            result: None,
        }
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    pub fn default_cube(&self) -> &CubeState {
        &self.default_cube
    }

    pub fn prior_cube(&self) -> Option<&CubeState> {
        self.prior_cube.as_ref()
    }

    pub fn selected_color(&self) -> Option<Facelet> {
        self.selected_color
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&SolveResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> ControllerPhase {
        if self.in_flight {
            ControllerPhase::Loading
        } else if self.alert.is_active() {
            ControllerPhase::AlertShown
        } else {
            ControllerPhase::Idle
        }
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            cube: self.cube.clone(),
            prior_cube: self.prior_cube.clone(),
            selected_color: self.selected_color,
            alert: self.alert.clone(),
            in_flight: self.in_flight,
            result: self.result.clone(),
            phase: self.phase(),
        }
    }

    /// Applies the validator's verdict: success replaces the cube and clears
    /// the alert, failure raises the alert and keeps the cube.
    pub(crate) fn apply_validation(
        &mut self,
        verdict: Result<CubeState, ValidationError>,
    ) -> Result<CubeState, ValidationError> {
        match verdict {
            Ok(cube) => {
                self.alert.clear();
                self.cube = cube.clone();
                Ok(cube)
            }
            Err(err) => {
                self.alert.raise(err.message());
                Err(err)
            }
        }
    }

    pub(crate) fn select_color(&mut self, color: Option<Facelet>) {
        self.selected_color = color;
    }

    /// Marks a request as dispatched. Refused while an alert is showing or a
    /// previous request has not settled.
    pub(crate) fn begin_solve(&mut self) -> Option<SolveTicket> {
        if self.alert.is_active() || self.in_flight {
            return None;
        }

        self.in_flight = true;
        self.alert.clear();
        self.generation += 1;
        Some(SolveTicket {
            generation: self.generation,
            prior: self.cube.clone(),
        })
    }

    /// Returns false when the ticket is stale and nothing was applied.
    pub(crate) fn settle_solve(&mut self, ticket: &SolveTicket, outcome: &SolveOutcome) -> bool {
        if !self.in_flight || ticket.generation != self.generation {
            return false;
        }

        self.in_flight = false;
        match outcome {
            SolveOutcome::Solved(solved) => {
                self.prior_cube = Some(ticket.prior.clone());
                self.cube = solved.cube.clone();
                self.result = Some(solved.result.clone());
                self.alert.clear();
            }
            SolveOutcome::ApplicationError(message) => self.alert.raise(message.clone()),
            SolveOutcome::TransportError(_) => self.alert.raise(TRANSPORT_FAILURE_MESSAGE),
        }
        true
    }

    /// Drops the in-flight request without raising an alert.
    pub(crate) fn abandon_solve(&mut self) -> bool {
        if !self.in_flight {
            return false;
        }
        self.in_flight = false;
        self.generation += 1;
        true
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
