//! Building blocks shared by the preference losses

use crate::autograd::{add, log_sigmoid, scale, sub};
use crate::Tensor;

/// `(pc - pr) - (rc - rr)`
pub(crate) fn preference_logits(
    policy_chosen: &Tensor,
    policy_rejected: &Tensor,
    reference_chosen: &Tensor,
    reference_rejected: &Tensor,
) -> Tensor {
    let pi_logratios = sub(policy_chosen, policy_rejected);
    let ref_logratios = sub(reference_chosen, reference_rejected);
    sub(&pi_logratios, &ref_logratios)
}

/// Label-smoothed logistic loss on `beta * logits`
///
/// `-(1 - ls) * log_sigmoid(beta * l) - ls * log_sigmoid(-beta * l)`.
/// With `ls == 0` only the first term is built, so the result is exactly
/// `-log_sigmoid(beta * l)`.
pub(crate) fn smoothed_logistic_loss(logits: &Tensor, beta: f32, label_smoothing: f32) -> Tensor {
    let scaled = scale(logits, beta);
    if label_smoothing == 0.0 {
        return scale(&log_sigmoid(&scaled), -1.0);
    }

    let agree = scale(&log_sigmoid(&scaled), -(1.0 - label_smoothing));
    let flipped = scale(&log_sigmoid(&scale(&scaled, -1.0)), -label_smoothing);
    add(&agree, &flipped)
}

/// `coef * (policy - reference)` over detached copies
///
/// Without a reference this is `coef * policy`. The result never requires
/// gradient, so it cannot feed back into a loss graph.
pub(crate) fn detached_rewards(coef: f32, policy: &Tensor, reference: Option<&Tensor>) -> Tensor {
    let policy = policy.detach();
    match reference {
        Some(reference) => scale(&sub(&policy, &reference.detach()), coef),
        None => scale(&policy, coef),
    }
}
