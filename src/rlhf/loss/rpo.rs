//! Iterative Reasoning Preference Optimization loss
//!
//! Pang et al., "Iterative Reasoning Preference Optimization" (2024): the DPO
//! objective plus a weighted negative log-likelihood term on the chosen
//! response.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, preference_logits, smoothed_logistic_loss};
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{add, scale};
use crate::config::{check_beta, check_label_smoothing, check_rpo_alpha, ValidationError};
use crate::error::{Error, Result};
use crate::Tensor;

/// Validated RPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RPOConfig {
    beta: f32,
    label_smoothing: f32,
    rpo_alpha: f32,
}

impl RPOConfig {
    pub fn new(
        beta: f32,
        label_smoothing: f32,
        rpo_alpha: f32,
    ) -> std::result::Result<Self, ValidationError> {
        check_beta(beta)?;
        check_label_smoothing(label_smoothing)?;
        check_rpo_alpha(rpo_alpha)?;
        Ok(Self {
            beta,
            label_smoothing,
            rpo_alpha,
        })
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn label_smoothing(&self) -> f32 {
        self.label_smoothing
    }

    /// Weight of the chosen-response NLL term
    pub fn rpo_alpha(&self) -> f32 {
        self.rpo_alpha
    }
}

impl Default for RPOConfig {
    fn default() -> Self {
        Self {
            beta: 0.1,
            label_smoothing: 0.0,
            rpo_alpha: 1.0,
        }
    }
}

/// RPO loss
///
/// ```text
/// logits = (pc - pr) - (rc - rr)
/// loss   = smoothed_logistic(beta * logits) + rpo_alpha * nll
/// ```
///
/// `nll` is the per-example negative log-likelihood of the chosen response,
/// normalized by the caller. [`PreferenceLoss::forward`] reads it from
/// [`PreferenceBatch::nll_loss`].
#[derive(Debug, Clone, Default)]
pub struct RPOLoss {
    config: RPOConfig,
}

impl RPOLoss {
    pub fn new(config: RPOConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RPOConfig {
        &self.config
    }

    /// Per-example loss and rewards for aligned log-probability vectors
    pub fn compute(
        &self,
        policy_chosen_logps: &Tensor,
        policy_rejected_logps: &Tensor,
        reference_chosen_logps: &Tensor,
        reference_rejected_logps: &Tensor,
        nll_loss: &Tensor,
    ) -> Result<PreferenceOutput> {
        check_aligned(&[
            ("policy_chosen_logps", policy_chosen_logps),
            ("policy_rejected_logps", policy_rejected_logps),
            ("reference_chosen_logps", reference_chosen_logps),
            ("reference_rejected_logps", reference_rejected_logps),
            ("nll_loss", nll_loss),
        ])?;

        let RPOConfig {
            beta,
            label_smoothing,
            rpo_alpha,
        } = self.config;

        let logits = preference_logits(
            policy_chosen_logps,
            policy_rejected_logps,
            reference_chosen_logps,
            reference_rejected_logps,
        );
        let preference = smoothed_logistic_loss(&logits, beta, label_smoothing);
        let losses = add(&preference, &scale(nll_loss, rpo_alpha));

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            beta,
            label_smoothing,
            rpo_alpha,
            "computed preference loss"
        );

        Ok(PreferenceOutput {
            losses,
            chosen_rewards: detached_rewards(beta, policy_chosen_logps, Some(reference_chosen_logps)),
            rejected_rewards: detached_rewards(
                beta,
                policy_rejected_logps,
                Some(reference_rejected_logps),
            ),
        })
    }
}

impl PreferenceLoss for RPOLoss {
    fn forward(&self, batch: &PreferenceBatch) -> Result<PreferenceOutput> {
        let (reference_chosen, reference_rejected) = batch.require_reference(self.name())?;
        let nll_loss = batch.nll_loss().ok_or(Error::MissingInput {
            loss: self.name(),
            input: "nll_loss",
        })?;
        self.compute(
            batch.policy_chosen_logps(),
            batch.policy_rejected_logps(),
            reference_chosen,
            reference_rejected,
            nll_loss,
        )
    }

    fn name(&self) -> &'static str {
        "RPO"
    }
}
