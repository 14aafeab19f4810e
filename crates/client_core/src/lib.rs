use std::{sync::Arc, time::Duration};

use shared::{
    domain::{CubeState, Facelet},
    error::ValidationError,
    protocol::SolveResponse,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::{AbortHandle, JoinHandle},
    time::timeout,
};
use tracing::{debug, info, warn};

pub mod error;
pub mod store;
pub mod transport;
pub mod validator;

pub use error::{PaintError, TransportError};
pub use store::{
    Alert, ControllerPhase, PuzzleSnapshot, PuzzleStateStore, SolveResult,
    TRANSPORT_FAILURE_MESSAGE,
};
pub use transport::{HttpSolverTransport, SolverTransport};

use store::SolveTicket;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct SolvedCube {
    pub cube: CubeState,
    pub result: SolveResult,
}

/// Settled result of one solve request.
#[derive(Debug)]
pub enum SolveOutcome {
    Solved(SolvedCube),
    /// The solver understood the request and refused it.
    ApplicationError(String),
    TransportError(TransportError),
}

impl SolveOutcome {
    /// Text the alert shows for this outcome, `None` on success.
    pub fn alert_message(&self) -> Option<&str> {
        match self {
            Self::Solved(_) => None,
            Self::ApplicationError(message) => Some(message.as_str()),
            Self::TransportError(_) => Some(TRANSPORT_FAILURE_MESSAGE),
        }
    }
}

/// Reads a solver body. `error` wins over every other field; a success must
/// carry a valid cube, the moves and a non-negative duration.
pub fn interpret_response(response: SolveResponse) -> SolveOutcome {
    if let Some(message) = response.error {
        return SolveOutcome::ApplicationError(message);
    }

    let (Some(cube), Some(moves), Some(duration_ms)) =
        (response.cube, response.moves, response.time_to_solve)
    else {
        return SolveOutcome::TransportError(TransportError::MalformedResponse(
            "expected `cube`, `moves` and `timeToSolve`".to_string(),
        ));
    };

    if !duration_ms.is_finite() || duration_ms < 0.0 {
        return SolveOutcome::TransportError(TransportError::MalformedResponse(format!(
            "invalid `timeToSolve` {duration_ms}"
        )));
    }

    match CubeState::parse(&cube) {
        Ok(cube) => SolveOutcome::Solved(SolvedCube {
            cube,
            result: SolveResult { moves, duration_ms },
        }),
        Err(err) => SolveOutcome::TransportError(TransportError::MalformedResponse(format!(
            "invalid `cube`: {err}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    CubeChanged(CubeState),
    ColorSelected(Option<Facelet>),
    AlertRaised(String),
    SolveStarted {
        cube: CubeState,
    },
    Solved {
        prior: CubeState,
        cube: CubeState,
        result: SolveResult,
    },
    SolveFailed {
        message: String,
    },
    SolveCancelled,
}

/// Await to observe the settled outcome. Dropping it does not cancel the
/// request; use [`CubeController::cancel_solve`].
pub struct SolveHandle {
    task: JoinHandle<SolveOutcome>,
}

impl SolveHandle {
    /// `None` when the request was cancelled before it settled.
    pub async fn settled(self) -> Option<SolveOutcome> {
        self.task.await.ok()
    }
}

struct ControllerState {
    store: PuzzleStateStore,
    active_solve: Option<AbortHandle>,
}

pub struct CubeController<T: SolverTransport> {
    transport: T,
    inner: Mutex<ControllerState>,
    request_timeout: Duration,
    events: broadcast::Sender<ControllerEvent>,
}

impl<T: SolverTransport + 'static> CubeController<T> {
    pub fn new(transport: T, default_cube: CubeState) -> Arc<Self> {
        Self::with_request_timeout(transport, default_cube, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(
        transport: T,
        default_cube: CubeState,
        request_timeout: Duration,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            transport,
            inner: Mutex::new(ControllerState {
                store: PuzzleStateStore::new(default_cube),
                active_solve: None,
            }),
            request_timeout,
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> PuzzleSnapshot {
        self.inner.lock().await.store.snapshot()
    }

    pub async fn phase(&self) -> ControllerPhase {
        self.inner.lock().await.store.phase()
    }

    /// Validates `candidate` and, on success, makes it the current cube.
    /// Failure raises the alert and leaves the cube untouched.
    pub async fn validate(&self, candidate: &str) -> Result<CubeState, ValidationError> {
        let applied = {
            let mut inner = self.inner.lock().await;
            let verdict = validator::validate(candidate, inner.store.default_cube());
            inner.store.apply_validation(verdict)
        };

        match &applied {
            Ok(cube) => {
                debug!(cube = %cube, "cube updated");
                let _ = self.events.send(ControllerEvent::CubeChanged(cube.clone()));
            }
            Err(err) => {
                warn!(error = ?err, "rejected cube edit");
                let _ = self.events.send(ControllerEvent::AlertRaised(err.message()));
            }
        }
        applied
    }

    pub async fn select_color(&self, color: Option<Facelet>) {
        self.inner.lock().await.store.select_color(color);
        let _ = self.events.send(ControllerEvent::ColorSelected(color));
    }

    /// Recolors one cell with the selected color and runs the result through
    /// [`Self::validate`].
    pub async fn paint_facelet(&self, index: usize) -> Result<CubeState, PaintError> {
        let candidate = {
            let inner = self.inner.lock().await;
            let color = inner
                .store
                .selected_color()
                .ok_or(PaintError::NoColorSelected)?;
            inner
                .store
                .cube()
                .with_facelet(index, color)
                .ok_or(PaintError::OutOfRange { index })?
        };
        Ok(self.validate(&candidate).await?)
    }

    /// Dispatches the current cube to the solver in the background.
    ///
    /// Returns `None` without touching any state while an alert is active or
    /// a previous solve is still in flight.
    pub async fn solve(self: &Arc<Self>) -> Option<SolveHandle> {
        let mut inner = self.inner.lock().await;
        let Some(ticket) = inner.store.begin_solve() else {
            debug!(phase = ?inner.store.phase(), "solve ignored");
            return None;
        };

        let _ = self.events.send(ControllerEvent::SolveStarted {
            cube: ticket.prior.clone(),
        });

        // Settling needs `inner`, which stays locked until `active_solve` is set.
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move { controller.run_solve(ticket).await });
        inner.active_solve = Some(task.abort_handle());
        Some(SolveHandle { task })
    }

    /// Aborts the in-flight request, if any. No alert is raised and a late
    /// response is discarded.
    pub async fn cancel_solve(&self) -> bool {
        let cancelled = {
            let mut inner = self.inner.lock().await;
            if let Some(task) = inner.active_solve.take() {
                task.abort();
            }
            inner.store.abandon_solve()
        };

        if cancelled {
            info!("solve cancelled");
            let _ = self.events.send(ControllerEvent::SolveCancelled);
        }
        cancelled
    }

    async fn run_solve(&self, ticket: SolveTicket) -> SolveOutcome {
        debug!(generation = ticket.generation, cube = %ticket.prior, "dispatching solve request");

        let outcome = match timeout(self.request_timeout, self.transport.solve(&ticket.prior)).await
        {
            Ok(Ok(response)) => interpret_response(response),
            Ok(Err(err)) => SolveOutcome::TransportError(err),
            Err(_) => SolveOutcome::TransportError(TransportError::TimedOut(self.request_timeout)),
        };

        let applied = {
            let mut inner = self.inner.lock().await;
            let applied = inner.store.settle_solve(&ticket, &outcome);
            if applied {
                inner.active_solve = None;
            }
            applied
        };

        if !applied {
            debug!(generation = ticket.generation, "discarding stale solve outcome");
            return outcome;
        }

        match &outcome {
            SolveOutcome::Solved(solved) => {
                info!(
                    moves = solved.result.moves.len(),
                    duration_ms = solved.result.duration_ms,
                    "cube solved"
                );
                let _ = self.events.send(ControllerEvent::Solved {
                    prior: ticket.prior.clone(),
                    cube: solved.cube.clone(),
                    result: solved.result.clone(),
                });
            }
            SolveOutcome::ApplicationError(message) => {
                warn!(%message, "solver rejected cube");
                let _ = self.events.send(ControllerEvent::SolveFailed {
                    message: message.clone(),
                });
            }
            SolveOutcome::TransportError(err) => {
                warn!(error = %err, "solve request failed");
                let _ = self.events.send(ControllerEvent::SolveFailed {
                    message: TRANSPORT_FAILURE_MESSAGE.to_string(),
                });
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
