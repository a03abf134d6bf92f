//! Preference optimization for RLHF-style fine-tuning
//!
//! - [`loss`]: DPO, DPOP, RPO, RSO, SimPO and IPO objectives over aligned
//!   log-probability vectors
//! - [`metrics`]: batch summaries of a loss evaluation for monitoring
//!
//! Everything upstream of the log-probabilities (forward passes, token
//! gathering) and downstream of the loss (optimizer step, metric sinks) is
//! the caller's concern.

pub mod loss;
pub mod metrics;

pub use loss::{
    DPOConfig, DPOLoss, DPOPLoss, IPOConfig, IPOLoss, PreferenceBatch, PreferenceLoss,
    PreferenceOutput, RPOConfig, RPOLoss, RSOConfig, RSOLoss, SimPOConfig, SimPOLoss,
};
pub use metrics::PreferenceMetrics;
