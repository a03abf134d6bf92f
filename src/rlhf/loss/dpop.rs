//! DPO-Positive loss
//!
//! Pal et al., "Smaug: Fixing Failure Modes of Preference Optimisation with
//! DPO-Positive" (2024). Unlike the penalty option of [`super::DPOLoss`], the
//! positive penalty is subtracted from the log-sigmoid term rather than from
//! the logits.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, preference_logits};
use super::dpo::DPOConfig;
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{clamp_min, log_sigmoid, scale, sub};
use crate::error::Result;
use crate::Tensor;

/// DPOP loss
///
/// ```text
/// logits = (pc - pr) - (rc - rr)
/// loss   = -(log_sigmoid(beta * logits) - lambda_dpop * clamp(rc - pc, min = 0))
/// ```
///
/// Reads `beta` and `lambda_dpop` from a [`DPOConfig`]; `label_smoothing` is
/// not part of this objective and is ignored.
#[derive(Debug, Clone, Default)]
pub struct DPOPLoss {
    config: DPOConfig,
}

impl DPOPLoss {
    pub fn new(config: DPOConfig) -> Self {
        if config.label_smoothing() > 0.0 {
            tracing::warn!(
                label_smoothing = config.label_smoothing(),
                "DPOP ignores label smoothing"
            );
        }
        Self { config }
    }

    pub fn config(&self) -> &DPOConfig {
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

        let beta = self.config.beta();
        let lambda_dpop = self.config.lambda_dpop();

        let logits = preference_logits(
            policy_chosen_logps,
            policy_rejected_logps,
            reference_chosen_logps,
            reference_rejected_logps,
        );
        let positive_reg = sub(reference_chosen_logps, policy_chosen_logps);
        let penalty = scale(&clamp_min(&positive_reg, 0.0), lambda_dpop);

        // -(a - b) = b - a
        let losses = sub(&penalty, &log_sigmoid(&scale(&logits, beta)));

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            beta,
            lambda_dpop,
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

impl PreferenceLoss for DPOPLoss {
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
        "DPOP"
    }
}
