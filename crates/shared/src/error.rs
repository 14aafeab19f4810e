use thiserror::Error;

/// Reasons a candidate cube string is rejected.
///
/// `Display` is the message shown to the user; the fields carry the detail
/// that goes into logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cube string must be 54 characters long.")]
    InvalidLength { actual: usize },
    #[error(
        "The cube string argument contains invalid characters \
         (i.e. something other than 'W', 'B', 'R', 'G', 'Y', 'O')."
    )]
    InvalidCharacter { character: char, position: usize },
}

impl ValidationError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
