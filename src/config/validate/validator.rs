//! Hyperparameter validation logic
//!
//! The `check_*` functions are shared by the loss configuration constructors
//! and by [`validate_spec`], so a YAML document and a hand-built config are
//! held to the same rules.

use super::error::ValidationError;
use crate::config::schema::LossSpec;

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Temperature must be finite and strictly positive
pub fn check_beta(beta: f32) -> Result<(), ValidationError> {
    if positive(beta) {
        Ok(())
    } else {
        Err(ValidationError::InvalidBeta(beta))
    }
}

/// IPO regularization strength must be finite and strictly positive
pub fn check_tau(tau: f32) -> Result<(), ValidationError> {
    if positive(tau) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTau(tau))
    }
}

/// Label smoothing is a probability
pub fn check_label_smoothing(label_smoothing: f32) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&label_smoothing) {
        if label_smoothing > 0.5 {
            tracing::warn!(
                label_smoothing,
                "label smoothing above 0.5 makes the objective prefer the rejected response"
            );
        }
        Ok(())
    } else {
        Err(ValidationError::InvalidLabelSmoothing(label_smoothing))
    }
}

/// DPOP penalty weight must be finite and non-negative
pub fn check_lambda_dpop(lambda_dpop: f32) -> Result<(), ValidationError> {
    if non_negative(lambda_dpop) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLambdaDpop(lambda_dpop))
    }
}

/// RPO negative log-likelihood weight must be finite and non-negative
pub fn check_rpo_alpha(rpo_alpha: f32) -> Result<(), ValidationError> {
    if non_negative(rpo_alpha) {
        Ok(())
    } else {
        Err(ValidationError::InvalidRpoAlpha(rpo_alpha))
    }
}

/// Margin / hinge scale must be finite and non-negative
pub fn check_gamma(gamma: f32) -> Result<(), ValidationError> {
    if non_negative(gamma) {
        Ok(())
    } else {
        Err(ValidationError::InvalidGamma(gamma))
    }
}

/// Validate a loss config
///
/// Checks every hyperparameter the selected loss reads. Fields are checked
/// in declaration order and the first violation is returned.
pub fn validate_spec(spec: &LossSpec) -> Result<(), ValidationError> {
    match spec {
        LossSpec::Dpo(s) => {
            check_beta(s.beta)?;
            check_label_smoothing(s.label_smoothing)?;
            check_lambda_dpop(s.lambda_dpop)
        }
        LossSpec::Dpop(s) => {
            check_beta(s.beta)?;
            check_lambda_dpop(s.lambda_dpop)
        }
        LossSpec::Rpo(s) => {
            check_beta(s.beta)?;
            check_label_smoothing(s.label_smoothing)?;
            check_rpo_alpha(s.rpo_alpha)
        }
        LossSpec::Rso(s) => check_gamma(s.gamma),
        LossSpec::Simpo(s) => {
            check_beta(s.beta)?;
            check_gamma(s.gamma)?;
            check_label_smoothing(s.label_smoothing)
        }
        LossSpec::Ipo(s) => check_tau(s.tau),
    }
}
