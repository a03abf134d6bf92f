//! SimPO: Simple Preference Optimization with a Reference-Free Reward
//!
//! Meng et al. (2024). The policy log-probabilities are expected to be
//! averaged over response tokens by the caller; no reference model is read.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, smoothed_logistic_loss};
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{add_scalar, sub};
use crate::config::{check_beta, check_gamma, check_label_smoothing, ValidationError};
use crate::error::Result;
use crate::Tensor;

/// Validated SimPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimPOConfig {
    beta: f32,
    gamma: f32,
    label_smoothing: f32,
}

impl SimPOConfig {
    pub fn new(
        beta: f32,
        gamma: f32,
        label_smoothing: f32,
    ) -> std::result::Result<Self, ValidationError> {
        check_beta(beta)?;
        check_gamma(gamma)?;
        check_label_smoothing(label_smoothing)?;
        Ok(Self {
            beta,
            gamma,
            label_smoothing,
        })
    }

    /// Reward scale, typically 2.0 to 2.5
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Target reward margin
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn label_smoothing(&self) -> f32 {
        self.label_smoothing
    }
}

impl Default for SimPOConfig {
    fn default() -> Self {
        Self {
            beta: 2.0,
            gamma: 0.5,
            label_smoothing: 0.0,
        }
    }
}

/// SimPO loss
///
/// ```text
/// logits = (pc - pr) - gamma / beta
/// loss   = -(1 - ls) * log_sigmoid(beta * logits) - ls * log_sigmoid(-beta * logits)
/// ```
///
/// Rewards are `beta * pc` and `beta * pr`.
///
/// # Example
///
/// ```
/// use alinear::rlhf::{PreferenceBatch, PreferenceLoss, SimPOLoss};
/// use alinear::Tensor;
///
/// let batch = PreferenceBatch::new(
///     Tensor::from_vec(vec![-0.8, -1.1], true),
///     Tensor::from_vec(vec![-1.4, -1.0], true),
/// )?;
///
/// let out = SimPOLoss::default().forward(&batch)?;
/// assert_eq!(out.len(), 2);
/// # Ok::<(), alinear::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimPOLoss {
    config: SimPOConfig,
}

impl SimPOLoss {
    pub fn new(config: SimPOConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimPOConfig {
        &self.config
    }

    /// Per-example loss and rewards for aligned log-probability vectors
    pub fn compute(
        &self,
        policy_chosen_logps: &Tensor,
        policy_rejected_logps: &Tensor,
    ) -> Result<PreferenceOutput> {
        check_aligned(&[
            ("policy_chosen_logps", policy_chosen_logps),
            ("policy_rejected_logps", policy_rejected_logps),
        ])?;

        let SimPOConfig {
            beta,
            gamma,
            label_smoothing,
        } = self.config;

        let logits = self.logits(policy_chosen_logps, policy_rejected_logps);
        let losses = smoothed_logistic_loss(&logits, beta, label_smoothing);

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            beta,
            gamma,
            label_smoothing,
            "computed preference loss"
        );

        Ok(PreferenceOutput {
            losses,
            chosen_rewards: detached_rewards(beta, policy_chosen_logps, None),
            rejected_rewards: detached_rewards(beta, policy_rejected_logps, None),
        })
    }

    fn logits(&self, policy_chosen_logps: &Tensor, policy_rejected_logps: &Tensor) -> Tensor {
        let pi_logratios = sub(policy_chosen_logps, policy_rejected_logps);
        let gamma_logratios = self.config.gamma / self.config.beta;
        add_scalar(&pi_logratios, -gamma_logratios)
    }
}

impl PreferenceLoss for SimPOLoss {
    /// Reference log-probabilities on the batch, if any, are not read
    fn forward(&self, batch: &PreferenceBatch) -> Result<PreferenceOutput> {
        self.compute(batch.policy_chosen_logps(), batch.policy_rejected_logps())
    }

    fn name(&self) -> &'static str {
        "SimPO"
    }

    fn requires_reference(&self) -> bool {
        false
    }
}
