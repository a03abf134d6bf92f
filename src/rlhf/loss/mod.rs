//! Preference loss functions
//!
//! Every loss consumes per-example log-probabilities of a chosen and a
//! rejected response and returns a [`PreferenceOutput`]: the per-example loss
//! plus chosen/rejected reward diagnostics. Rewards are computed from detached
//! copies of the inputs and never carry gradient.
//!
//! - [`DPOLoss`] - Direct Preference Optimization, optional DPOP penalty in the logits
//! - [`DPOPLoss`] - DPO-Positive, penalty applied outside the log-sigmoid
//! - [`RPOLoss`] - DPO plus a weighted NLL term on the chosen response
//! - [`RSOLoss`] - hinge loss on the preference logits
//! - [`SimPOLoss`] - reference-free, average log-probabilities and a target margin
//! - [`IPOLoss`] - squared loss towards a fixed logit target
//!
//! All six implement [`PreferenceLoss`], so a training loop can hold a
//! `Box<dyn PreferenceLoss>` and swap objectives through configuration.

mod batch;
mod common;
mod dpo;
mod dpop;
mod ipo;
mod rpo;
mod rso;
mod simpo;
mod traits;

#[cfg(test)]
mod proptests;

pub use batch::PreferenceBatch;
pub use dpo::{DPOConfig, DPOLoss};
pub use dpop::DPOPLoss;
pub use ipo::{IPOConfig, IPOLoss};
pub use rpo::{RPOConfig, RPOLoss};
pub use rso::{RSOConfig, RSOLoss};
pub use simpo::{SimPOConfig, SimPOLoss};
pub use traits::{PreferenceLoss, PreferenceOutput};
