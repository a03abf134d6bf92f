//! Statistical Rejection Sampling Optimization loss
//!
//! Liu et al., "Statistical Rejection Sampling Improves Preference
//! Optimization" (2024), hinge variant.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, preference_logits};
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{add_scalar, relu, scale};
use crate::config::{check_gamma, ValidationError};
use crate::error::Result;
use crate::Tensor;

/// Validated RSO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RSOConfig {
    gamma: f32,
}

impl RSOConfig {
    pub fn new(gamma: f32) -> std::result::Result<Self, ValidationError> {
        check_gamma(gamma)?;
        Ok(Self { gamma })
    }

    /// Hinge scale; also scales the reward diagnostics
    pub fn gamma(&self) -> f32 {
        self.gamma
    }
}

impl Default for RSOConfig {
    fn default() -> Self {
        Self { gamma: 0.1 }
    }
}

/// RSO hinge loss
///
/// ```text
/// logits = (pc - pr) - (rc - rr)
/// loss   = relu(1 - gamma * logits)
/// ```
///
/// The loss is zero once `gamma * logits >= 1`.
#[derive(Debug, Clone, Default)]
pub struct RSOLoss {
    config: RSOConfig,
}

impl RSOLoss {
    pub fn new(config: RSOConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RSOConfig {
        &self.config
    }

    /// Per-example loss and rewards for aligned log-probability vectors
    pub fn compute(
        &self,
        policy_chosen_logps: &Tensor,
        policy_rejected_logps: &Tensor,
        reference_chosen_logps: &Tensor,
        reference_rejected_logps: &Tensor,
    ) -> Result<PreferenceOutput> {
        check_aligned(&[
            ("policy_chosen_logps", policy_chosen_logps),
            ("policy_rejected_logps", policy_rejected_logps),
            ("reference_chosen_logps", reference_chosen_logps),
            ("reference_rejected_logps", reference_rejected_logps),
        ])?;

        let gamma = self.config.gamma;
        let logits = preference_logits(
            policy_chosen_logps,
            policy_rejected_logps,
            reference_chosen_logps,
            reference_rejected_logps,
        );
        let losses = relu(&add_scalar(&scale(&logits, -gamma), 1.0));

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            gamma,
            "computed preference loss"
        );

        Ok(PreferenceOutput {
            losses,
            chosen_rewards: detached_rewards(
                gamma,
                policy_chosen_logps,
                Some(reference_chosen_logps),
            ),
            rejected_rewards: detached_rewards(
                gamma,
                policy_rejected_logps,
                Some(reference_rejected_logps),
            ),
        })
    }
}

impl PreferenceLoss for RSOLoss {
    fn forward(&self, batch: &PreferenceBatch) -> Result<PreferenceOutput> {
        let (reference_chosen, reference_rejected) = batch.require_reference(self.name())?;
        self.compute(
            batch.policy_chosen_logps(),
            batch.policy_rejected_logps(),
            reference_chosen,
            reference_rejected,
        )
    }

    fn name(&self) -> &'static str {
        "RSO"
    }
}
