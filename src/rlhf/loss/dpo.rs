//! Direct Preference Optimization loss
//!
//! Rafailov et al., "Direct Preference Optimization: Your Language Model is
//! Secretly a Reward Model" (2023). The optional positive penalty follows
//! Pal et al., "Smaug: Fixing Failure Modes of Preference Optimisation with
//! DPO-Positive" (2024), folded into the logits.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, preference_logits, smoothed_logistic_loss};
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{maximum, scale, sub};
use crate::config::{check_beta, check_label_smoothing, check_lambda_dpop, ValidationError};
use crate::error::Result;
use crate::Tensor;

/// Validated DPO hyperparameters
///
/// Also used by [`super::DPOPLoss`], which ignores `label_smoothing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DPOConfig {
    beta: f32,
    label_smoothing: f32,
    lambda_dpop: f32,
}

impl DPOConfig {
    /// Create a config, rejecting out-of-range values
    ///
    /// `beta` must be finite and positive, `label_smoothing` in `[0, 1]`,
    /// `lambda_dpop` finite and non-negative.
    pub fn new(
        beta: f32,
        label_smoothing: f32,
        lambda_dpop: f32,
    ) -> std::result::Result<Self, ValidationError> {
        check_beta(beta)?;
        check_label_smoothing(label_smoothing)?;
        check_lambda_dpop(lambda_dpop)?;
        Ok(Self {
            beta,
            label_smoothing,
            lambda_dpop,
        })
    }

    /// Temperature on the preference logits
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Probability that a preference label is flipped
    pub fn label_smoothing(&self) -> f32 {
        self.label_smoothing
    }

    /// Weight of the positive penalty `max(0, rc - pc)`
    ///
    /// The penalty is an element-wise maximum: where `pc == rc` it passes half
    /// of its gradient to `pc`.
    pub fn lambda_dpop(&self) -> f32 {
        self.lambda_dpop
    }
}

impl Default for DPOConfig {
    fn default() -> Self {
        Self {
            beta: 0.1,
            label_smoothing: 0.0,
            lambda_dpop: 0.0,
        }
    }
}

/// DPO loss
///
/// ```text
/// logits = (pc - pr) - (rc - rr) - lambda_dpop * max(0, rc - pc)
/// loss   = -(1 - ls) * log_sigmoid(beta * logits) - ls * log_sigmoid(-beta * logits)
/// ```
///
/// # Example
///
/// ```
/// use alinear::rlhf::DPOLoss;
/// use alinear::Tensor;
///
/// let loss_fn = DPOLoss::default();
/// let out = loss_fn.compute(
///     &Tensor::from_vec(vec![-1.0], true),
///     &Tensor::from_vec(vec![-2.0], true),
///     &Tensor::from_vec(vec![-1.5], false),
///     &Tensor::from_vec(vec![-2.5], false),
/// )?;
///
/// assert!((out.losses.data()[0] - std::f32::consts::LN_2).abs() < 1e-6);
/// # Ok::<(), alinear::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DPOLoss {
    config: DPOConfig,
}

impl DPOLoss {
    pub fn new(config: DPOConfig) -> Self {
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

        let DPOConfig {
            beta,
            label_smoothing,
            lambda_dpop,
        } = self.config;

        let mut logits = preference_logits(
            policy_chosen_logps,
            policy_rejected_logps,
            reference_chosen_logps,
            reference_rejected_logps,
        );
        if lambda_dpop > 0.0 {
            let penalty = maximum(&sub(reference_chosen_logps, policy_chosen_logps), 0.0);
            logits = sub(&logits, &scale(&penalty, lambda_dpop));
        }

        let losses = smoothed_logistic_loss(&logits, beta, label_smoothing);

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            beta,
            label_smoothing,
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

impl PreferenceLoss for DPOLoss {
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
        "DPO"
    }
}
