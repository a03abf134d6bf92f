//! Aligned preference batch

use crate::error::{Error, Result};
use crate::Tensor;

/// Per-example log-probabilities for one preference batch
///
/// Index `i` of every vector refers to the same training example. Lengths
/// are checked when each vector is attached, so a constructed batch is
/// always aligned.
///
/// # Example
///
/// ```
/// use alinear::rlhf::PreferenceBatch;
/// use alinear::Tensor;
///
/// let batch = PreferenceBatch::new(
///     Tensor::from_vec(vec![-1.0, -0.5], true),
///     Tensor::from_vec(vec![-2.0, -1.5], true),
/// )?
/// .with_reference(
///     Tensor::from_vec(vec![-1.2, -0.7], false),
///     Tensor::from_vec(vec![-1.8, -1.4], false),
/// )?;
///
/// assert_eq!(batch.len(), 2);
/// # Ok::<(), alinear::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PreferenceBatch {
    policy_chosen_logps: Tensor,
    policy_rejected_logps: Tensor,
    reference: Option<(Tensor, Tensor)>,
    nll_loss: Option<Tensor>,
}

impl PreferenceBatch {
    /// Create a reference-free batch from policy log-probabilities
    pub fn new(policy_chosen_logps: Tensor, policy_rejected_logps: Tensor) -> Result<Self> {
        Error::check_len(
            "policy_rejected_logps",
            policy_chosen_logps.len(),
            policy_rejected_logps.len(),
        )?;
        Ok(Self {
            policy_chosen_logps,
            policy_rejected_logps,
            reference: None,
            nll_loss: None,
        })
    }

    /// Attach frozen reference-model log-probabilities
    pub fn with_reference(
        mut self,
        reference_chosen_logps: Tensor,
        reference_rejected_logps: Tensor,
    ) -> Result<Self> {
        Error::check_len(
            "reference_chosen_logps",
            self.len(),
            reference_chosen_logps.len(),
        )?;
        Error::check_len(
            "reference_rejected_logps",
            self.len(),
            reference_rejected_logps.len(),
        )?;
        self.reference = Some((reference_chosen_logps, reference_rejected_logps));
        Ok(self)
    }

    /// Attach the per-example NLL of the chosen response (read by RPO)
    pub fn with_nll_loss(mut self, nll_loss: Tensor) -> Result<Self> {
        Error::check_len("nll_loss", self.len(), nll_loss.len())?;
        self.nll_loss = Some(nll_loss);
        Ok(self)
    }

    /// Batch size
    pub fn len(&self) -> usize {
        self.policy_chosen_logps.len()
    }

    /// Whether the batch has no examples
    pub fn is_empty(&self) -> bool {
        self.policy_chosen_logps.is_empty()
    }

    pub fn policy_chosen_logps(&self) -> &Tensor {
        &self.policy_chosen_logps
    }

    pub fn policy_rejected_logps(&self) -> &Tensor {
        &self.policy_rejected_logps
    }

    /// `(reference_chosen_logps, reference_rejected_logps)`, if attached
    pub fn reference(&self) -> Option<(&Tensor, &Tensor)> {
        self.reference.as_ref().map(|(c, r)| (c, r))
    }

    pub fn nll_loss(&self) -> Option<&Tensor> {
        self.nll_loss.as_ref()
    }

    /// Reference log-probabilities, or a `MissingInput` error naming `loss`
    pub(crate) fn require_reference(&self, loss: &'static str) -> Result<(&Tensor, &Tensor)> {
        self.reference().ok_or(Error::MissingInput {
            loss,
            input: "reference log-probabilities",
        })
    }
}

/// Check that every named input has the length of the first one
pub(crate) fn check_aligned(inputs: &[(&'static str, &Tensor)]) -> Result<()> {
    let Some((_, first)) = inputs.first() else {
        return Ok(());
    };
    inputs
        .iter()
        .skip(1)
        .try_for_each(|&(name, tensor)| Error::check_len(name, first.len(), tensor.len()))
}
