use std::time::Duration;

use shared::error::ValidationError;
use thiserror::Error;

/// The solve request never produced a usable answer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid solver endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("solver request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("solver response is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("solver response could not be interpreted: {0}")]
    MalformedResponse(String),
    #[error("solver did not respond within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    #[error("no color selected")]
    NoColorSelected,
    #[error("facelet index {index} is outside the cube (0..54)")]
    OutOfRange { index: usize },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
