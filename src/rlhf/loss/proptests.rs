//! Property-based tests for the preference losses

#![allow(clippy::unwrap_used)]

use super::*;
use crate::autograd::log_sigmoid_scalar;
use crate::Tensor;
use proptest::prelude::*;

/// Four aligned log-probability vectors
fn arb_logps(
    range: std::ops::Range<f32>,
) -> impl Strategy<Value = (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>)> {
    prop::collection::vec(
        (range.clone(), range.clone(), range.clone(), range),
        0..32,
    )
    .prop_map(|rows| {
        let mut cols = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        for (pc, pr, rc, rr) in rows {
            cols.0.push(pc);
            cols.1.push(pr);
            cols.2.push(rc);
            cols.3.push(rr);
        }
        cols
    })
}

fn batch(pc: &[f32], pr: &[f32], rc: &[f32], rr: &[f32]) -> PreferenceBatch {
    let t = |v: &[f32]| Tensor::from_vec(v.to_vec(), true);
    PreferenceBatch::new(t(pc), t(pr))
        .and_then(|b| b.with_reference(t(rc), t(rr)))
        .and_then(|b| b.with_nll_loss(Tensor::from_vec(pc.iter().map(|v| -v).collect(), false)))
        .unwrap()
}

fn all_losses(beta: f32, ls: f32) -> Vec<Box<dyn PreferenceLoss>> {
    let dpo = DPOConfig::new(beta, ls, 1.0).unwrap();
    vec![
        Box::new(DPOLoss::new(dpo)),
        Box::new(DPOPLoss::new(DPOConfig::new(beta, 0.0, 1.0).unwrap())),
        Box::new(RPOLoss::new(RPOConfig::new(beta, ls, 0.5).unwrap())),
        Box::new(RSOLoss::new(RSOConfig::new(beta).unwrap())),
        Box::new(SimPOLoss::new(SimPOConfig::new(beta, 0.5, ls).unwrap())),
        Box::new(IPOLoss::new(IPOConfig::new(beta).unwrap())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_outputs_match_batch_length(
        (pc, pr, rc, rr) in arb_logps(-20.0..0.0),
        beta in 0.01f32..2.0,
        ls in 0.0f32..=0.5,
    ) {
        let b = batch(&pc, &pr, &rc, &rr);
        for loss_fn in all_losses(beta, ls) {
            let out = loss_fn.forward(&b).unwrap_or_else(|e| panic!("{}: {e}", loss_fn.name()));
            prop_assert_eq!(out.losses.len(), pc.len());
            prop_assert_eq!(out.chosen_rewards.len(), pc.len());
            prop_assert_eq!(out.rejected_rewards.len(), pc.len());
            prop_assert!(!out.chosen_rewards.requires_grad());
            prop_assert!(!out.rejected_rewards.requires_grad());
        }
    }

    #[test]
    fn prop_dpo_without_penalty_is_vanilla(
        (pc, pr, rc, rr) in arb_logps(-20.0..0.0),
        beta in 0.01f32..2.0,
        ls in 0.0f32..=1.0,
    ) {
        let loss_fn = DPOLoss::new(DPOConfig::new(beta, ls, 0.0).unwrap());
        let out = loss_fn.forward(&batch(&pc, &pr, &rc, &rr)).unwrap();

        for i in 0..pc.len() {
            let z = beta * ((pc[i] - pr[i]) - (rc[i] - rr[i]));
            let expected = -(1.0 - ls) * log_sigmoid_scalar(z) - ls * log_sigmoid_scalar(-z);
            let tol = 1e-4 * (1.0 + expected.abs());
            prop_assert!((out.losses.data()[i] - expected).abs() < tol);
        }
    }

    #[test]
    fn prop_dpo_no_smoothing_is_log_sigmoid(
        (pc, pr, rc, rr) in arb_logps(-20.0..0.0),
        beta in 0.01f32..2.0,
    ) {
        let loss_fn = DPOLoss::new(DPOConfig::new(beta, 0.0, 0.0).unwrap());
        let out = loss_fn.forward(&batch(&pc, &pr, &rc, &rr)).unwrap();

        for i in 0..pc.len() {
            let z = beta * ((pc[i] - pr[i]) - (rc[i] - rr[i]));
            let expected = -log_sigmoid_scalar(z);
            prop_assert!((out.losses.data()[i] - expected).abs() < 1e-4 * (1.0 + expected.abs()));
        }
    }

    #[test]
    fn prop_rso_hinge(
        (pc, pr, rc, rr) in arb_logps(-20.0..0.0),
        gamma in 0.01f32..2.0,
    ) {
        let loss_fn = RSOLoss::new(RSOConfig::new(gamma).unwrap());
        let out = loss_fn.forward(&batch(&pc, &pr, &rc, &rr)).unwrap();

        for i in 0..pc.len() {
            let z = gamma * ((pc[i] - pr[i]) - (rc[i] - rr[i]));
            let loss = out.losses.data()[i];
            if z >= 1.0 + 1e-4 {
                prop_assert_eq!(loss, 0.0);
            } else if z < 1.0 - 1e-4 {
                prop_assert!(loss > 0.0);
                prop_assert!((loss - (1.0 - z)).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn prop_simpo_equal_policy_is_margin_only(
        logps in prop::collection::vec(-20.0f32..0.0, 1..32),
        beta in 0.5f32..5.0,
        gamma in 0.0f32..2.0,
    ) {
        let loss_fn = SimPOLoss::new(SimPOConfig::new(beta, gamma, 0.0).unwrap());
        let t = Tensor::from_vec(logps.clone(), false);
        let out = loss_fn.compute(&t, &t).unwrap();

        // logits = -gamma / beta, so beta * logits = -gamma
        let expected = -log_sigmoid_scalar(-gamma);
        for &loss in out.losses.data() {
            prop_assert!((loss - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn prop_losses_finite_at_extremes(
        (pc, pr, rc, rr) in arb_logps(-1e4..0.0),
        beta in 0.01f32..10.0,
        ls in 0.0f32..=1.0,
    ) {
        let b = batch(&pc, &pr, &rc, &rr);
        for loss_fn in all_losses(beta, ls) {
            let out = loss_fn.forward(&b).unwrap();
            prop_assert!(
                out.losses.data().iter().all(|v| v.is_finite()),
                "{} produced a non-finite loss", loss_fn.name()
            );
        }
    }
}
