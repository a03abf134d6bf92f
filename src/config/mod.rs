//! Declarative loss configuration
//!
//! - [`LossSpec`]: YAML schema selecting one preference loss
//! - [`validate_spec`]: range checks for every hyperparameter
//! - [`load_loss_spec`] / [`build_loss_from_yaml`]: file entry points

mod loader;
mod schema;
mod validate;

pub use loader::{build_loss_from_yaml, load_loss_spec};
pub use schema::{DpoSpec, DpopSpec, IpoSpec, LossSpec, RpoSpec, RsoSpec, SimpoSpec};
pub use validate::{
    check_beta, check_gamma, check_label_smoothing, check_lambda_dpop, check_rpo_alpha,
    check_tau, validate_spec, ValidationError,
};
