//! Preference loss trait and output

use super::PreferenceBatch;
use crate::autograd::mean;
use crate::error::Result;
use crate::Tensor;

/// Per-example loss and detached reward diagnostics
#[derive(Debug, Clone)]
pub struct PreferenceOutput {
    /// Differentiable per-example loss
    pub losses: Tensor,
    /// Implicit reward of the chosen responses (detached)
    pub chosen_rewards: Tensor,
    /// Implicit reward of the rejected responses (detached)
    pub rejected_rewards: Tensor,
}

impl PreferenceOutput {
    /// Batch size
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    /// Whether the batch was empty
    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// Mean-reduced loss, ready for [`crate::autograd::backward`]
    pub fn mean_loss(&self) -> Tensor {
        mean(&self.losses)
    }

    /// Split into `(losses, chosen_rewards, rejected_rewards)`
    pub fn into_parts(self) -> (Tensor, Tensor, Tensor) {
        (self.losses, self.chosen_rewards, self.rejected_rewards)
    }
}

/// A preference-optimization objective
pub trait PreferenceLoss {
    /// Compute per-example losses and rewards for an aligned batch
    ///
    /// Fails with [`crate::Error::MissingInput`] when the batch lacks an input
    /// this objective reads.
    fn forward(&self, batch: &PreferenceBatch) -> Result<PreferenceOutput>;

    /// Name of the loss function
    fn name(&self) -> &'static str;

    /// Whether reference-model log-probabilities are read
    fn requires_reference(&self) -> bool {
        true
    }
}
