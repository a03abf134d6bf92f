//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_dpo() -> impl Strategy<Value = DpoSpec> {
    (
        1e-3f32..10.0, // beta
        0.0f32..=1.0,  // label_smoothing
        0.0f32..100.0, // lambda_dpop
    )
        .prop_map(|(beta, label_smoothing, lambda_dpop)| DpoSpec {
            beta,
            label_smoothing,
            lambda_dpop,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_dpo_passes(spec in arb_valid_dpo()) {
        prop_assert!(validate_spec(&LossSpec::Dpo(spec)).is_ok());
    }

    #[test]
    fn prop_non_positive_beta_fails(spec in arb_valid_dpo(), beta in -10.0f32..=0.0) {
        let spec = DpoSpec { beta, ..spec };
        prop_assert!(matches!(
            validate_spec(&LossSpec::Dpo(spec)),
            Err(ValidationError::InvalidBeta(_))
        ));
    }

    #[test]
    fn prop_label_smoothing_above_one_fails(spec in arb_valid_dpo(), ls in 1.0001f32..100.0) {
        let spec = DpoSpec { label_smoothing: ls, ..spec };
        prop_assert!(matches!(
            validate_spec(&LossSpec::Dpo(spec)),
            Err(ValidationError::InvalidLabelSmoothing(_))
        ));
    }

    #[test]
    fn prop_negative_gamma_fails(gamma in -100.0f32..-1e-6) {
        let spec = RsoSpec { gamma };
        prop_assert!(matches!(
            validate_spec(&LossSpec::Rso(spec)),
            Err(ValidationError::InvalidGamma(_))
        ));
    }

    #[test]
    fn prop_negative_rpo_alpha_fails(rpo_alpha in -100.0f32..-1e-6) {
        let spec = RpoSpec { rpo_alpha, ..RpoSpec::default() };
        prop_assert!(matches!(
            validate_spec(&LossSpec::Rpo(spec)),
            Err(ValidationError::InvalidRpoAlpha(_))
        ));
    }
}
