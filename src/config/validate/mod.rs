//! Configuration validation
//!
//! Validates loss hyperparameters before any loss is constructed.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::{
    check_beta, check_gamma, check_label_smoothing, check_lambda_dpop, check_rpo_alpha,
    check_tau, validate_spec,
};
