//! Crate-wide error type

use crate::config::ValidationError;

/// Result type alias for alinear operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the loss and configuration boundaries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input vector does not match the batch length
    #[error("Shape mismatch for {input}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        input: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A loss needs an input the batch does not carry
    #[error("{loss} loss requires {input}, but the batch does not provide it")]
    MissingInput {
        loss: &'static str,
        input: &'static str,
    },

    /// A hyperparameter is out of range
    #[error("Invalid loss configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Length check for a named input against the batch length
    pub(crate) fn check_len(input: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::ShapeMismatch {
                input,
                expected,
                actual,
            })
        }
    }
}
