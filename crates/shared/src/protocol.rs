use serde::{Deserialize, Serialize};

/// Query parameters of a solve request. The solver takes the canonical
/// state as its only argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveQuery {
    pub cube: String,
}

/// Body returned by the remote solver.
///
/// Every field is optional on the wire. `error` takes precedence: when it is
/// present the remaining fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<String>>,
    #[serde(
        default,
        rename = "timeToSolve",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_to_solve: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<String>,
}

impl SolveResponse {
    pub fn solved(cube: impl Into<String>, moves: Vec<String>, time_to_solve: f64) -> Self {
        Self {
            error: None,
            moves: Some(moves),
            time_to_solve: Some(time_to_solve),
            cube: Some(cube.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
