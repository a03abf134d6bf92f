//! Identity Preference Optimization loss
//!
//! Azar et al., "A General Theoretical Paradigm to Understand Learning from
//! Human Preferences" (2023). Regresses the preference logits onto a fixed
//! target instead of pushing them to infinity.

use super::batch::{check_aligned, PreferenceBatch};
use super::common::{detached_rewards, preference_logits};
use super::traits::{PreferenceLoss, PreferenceOutput};
use crate::autograd::{add_scalar, mul};
use crate::config::{check_tau, ValidationError};
use crate::error::Result;
use crate::Tensor;

/// Validated IPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IPOConfig {
    tau: f32,
}

impl IPOConfig {
    pub fn new(tau: f32) -> std::result::Result<Self, ValidationError> {
        check_tau(tau)?;
        Ok(Self { tau })
    }

    pub fn tau(&self) -> f32 {
        self.tau
    }

    /// Logit value at which the loss is zero
    pub fn target(&self) -> f32 {
        1.0 / (2.0 * self.tau)
    }
}

impl Default for IPOConfig {
    fn default() -> Self {
        Self { tau: 0.1 }
    }
}

/// IPO loss: `((pc - pr) - (rc - rr) - 1 / (2 * tau))^2`
#[derive(Debug, Clone, Default)]
pub struct IPOLoss {
    config: IPOConfig,
}

impl IPOLoss {
    pub fn new(config: IPOConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IPOConfig {
        &self.config
    }

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

        let tau = self.config.tau;
        let logits = preference_logits(
            policy_chosen_logps,
            policy_rejected_logps,
            reference_chosen_logps,
            reference_rejected_logps,
        );
        let residual = add_scalar(&logits, -self.config.target());
        let losses = mul(&residual, &residual);

        tracing::debug!(
            loss = self.name(),
            batch = losses.len(),
            tau,
            "computed preference loss"
        );

        Ok(PreferenceOutput {
            losses,
            chosen_rewards: detached_rewards(tau, policy_chosen_logps, Some(reference_chosen_logps)),
            rejected_rewards: detached_rewards(
                tau,
                policy_rejected_logps,
                Some(reference_rejected_logps),
            ),
        })
    }
}

impl PreferenceLoss for IPOLoss {
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
        "IPO"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::autograd::backward;
    use approx::assert_abs_diff_eq;

    fn t(values: &[f32]) -> Tensor {
        Tensor::from_vec(values.to_vec(), false)
    }

    #[test]
    fn test_zero_loss_at_target() {
        // tau = 0.1 targets logits = 5
        let out = IPOLoss::default()
            .compute(&t(&[0.0]), &t(&[-5.0]), &t(&[0.0]), &t(&[0.0]))
            .unwrap();
        assert_abs_diff_eq!(out.losses.data()[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_squared_distance_to_target() {
        let loss_fn = IPOLoss::new(IPOConfig::new(0.25).unwrap());
        // target 2; logits 0 and 5
        let out = loss_fn
            .compute(&t(&[-1.0, 0.0]), &t(&[-2.0, -5.0]), &t(&[-1.0, 0.0]), &t(&[-2.0, 0.0]))
            .unwrap();
        assert_abs_diff_eq!(out.losses.data()[0], 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(out.losses.data()[1], 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_gradient_of_square() {
        let pc = Tensor::from_vec(vec![0.0], true);
        let mut loss = IPOLoss::new(IPOConfig::new(0.5).unwrap())
            .compute(&pc, &t(&[-3.0]), &t(&[0.0]), &t(&[0.0]))
            .unwrap()
            .mean_loss();
        backward(&mut loss, None);
        // d/dpc (logits - 1)^2 = 2 * (3 - 1)
        assert_abs_diff_eq!(pc.grad().unwrap()[0], 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rewards_scale_with_tau() {
        let out = IPOLoss::default()
            .compute(&t(&[-1.0]), &t(&[-2.0]), &t(&[-2.0]), &t(&[-1.0]))
            .unwrap();
        assert_abs_diff_eq!(out.chosen_rewards.data()[0], 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(out.rejected_rewards.data()[0], -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_config_rejects_non_positive_tau() {
        assert_eq!(
            IPOConfig::new(0.0).unwrap_err(),
            ValidationError::InvalidTau(0.0)
        );
        assert!(IPOConfig::new(f32::NAN).is_err());
    }
}
