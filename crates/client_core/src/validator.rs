//! Candidate text to canonical state.

use shared::{domain::CubeState, error::ValidationError};

/// Validates user-supplied cube text.
///
/// Empty input means "reset" and resolves to `default_cube`. Anything else
/// must be exactly 54 symbols drawn from `W B R G Y O`, and is returned
/// unchanged.
pub fn validate(candidate: &str, default_cube: &CubeState) -> Result<CubeState, ValidationError> {
    if candidate.is_empty() {
        return Ok(default_cube.clone());
    }
    CubeState::parse(candidate)
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
