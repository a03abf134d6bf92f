//! Batch-level training diagnostics for preference losses

use super::loss::PreferenceOutput;
use serde::{Deserialize, Serialize};

/// Mean loss and reward statistics of one batch
///
/// Read from the detached reward vectors, so computing metrics never touches
/// the gradient graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceMetrics {
    /// Mean per-example loss
    pub loss: f32,
    /// Mean reward of the chosen responses
    pub chosen_reward: f32,
    /// Mean reward of the rejected responses
    pub rejected_reward: f32,
    /// `chosen_reward - rejected_reward`
    pub reward_margin: f32,
    /// Fraction of examples where the chosen reward beats the rejected one
    pub accuracy: f32,
}

impl PreferenceMetrics {
    /// Summarize a loss output; an empty batch yields all zeros
    pub fn compute(output: &PreferenceOutput) -> Self {
        let n = output.len();
        if n == 0 {
            return Self::default();
        }
        let n = n as f32;

        let loss = output.losses.data().sum() / n;
        let chosen = output.chosen_rewards.data();
        let rejected = output.rejected_rewards.data();
        let chosen_reward = chosen.sum() / n;
        let rejected_reward = rejected.sum() / n;

        let correct = chosen
            .iter()
            .zip(rejected.iter())
            .filter(|(c, r)| c > r)
            .count();

        Self {
            loss,
            chosen_reward,
            rejected_reward,
            reward_margin: chosen_reward - rejected_reward,
            accuracy: correct as f32 / n,
        }
    }

    /// Emit the metrics as a structured `info` record
    pub fn log(&self, loss_name: &str) {
        tracing::info!(
            loss_fn = loss_name,
            loss = self.loss,
            chosen_reward = self.chosen_reward,
            rejected_reward = self.rejected_reward,
            reward_margin = self.reward_margin,
            accuracy = self.accuracy,
            "preference metrics"
        );
    }
}
