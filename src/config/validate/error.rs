//! Validation error types
//!
//! One variant per loss hyperparameter, carrying the rejected value.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid beta: {0} (must be finite and > 0.0)")]
    InvalidBeta(f32),

    #[error("Invalid tau: {0} (must be finite and > 0.0)")]
    InvalidTau(f32),

    #[error("Invalid label_smoothing: {0} (must be in [0.0, 1.0])")]
    InvalidLabelSmoothing(f32),

    #[error("Invalid lambda_dpop: {0} (must be finite and >= 0.0)")]
    InvalidLambdaDpop(f32),

    #[error("Invalid rpo_alpha: {0} (must be finite and >= 0.0)")]
    InvalidRpoAlpha(f32),

    #[error("Invalid gamma: {0} (must be finite and >= 0.0)")]
    InvalidGamma(f32),
}
