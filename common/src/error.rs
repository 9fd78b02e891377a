use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Parameters that break the preconditions of maze generation or wall
    /// compilation. Startup should abort and show the message.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A logic fault inside generation or compilation. Never expected.
    #[error("algorithm invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl MazeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        MazeError::InvalidConfiguration(message.into())
    }
}
