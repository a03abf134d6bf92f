//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::*;
use crate::config::schema::*;

#[test]
fn test_default_specs_are_valid() {
    let specs = [
        LossSpec::Dpo(DpoSpec::default()),
        LossSpec::Dpop(DpopSpec::default()),
        LossSpec::Rpo(RpoSpec::default()),
        LossSpec::Rso(RsoSpec::default()),
        LossSpec::Simpo(SimpoSpec::default()),
        LossSpec::Ipo(IpoSpec::default()),
    ];
    for spec in &specs {
        assert!(validate_spec(spec).is_ok(), "{} defaults rejected", spec.kind());
    }
}

#[test]
fn test_invalid_beta() {
    assert_eq!(check_beta(0.0), Err(ValidationError::InvalidBeta(0.0)));
    assert_eq!(check_beta(-0.1), Err(ValidationError::InvalidBeta(-0.1)));
    assert!(check_beta(f32::INFINITY).is_err());
    assert!(check_beta(f32::NAN).is_err());
    assert!(check_beta(0.1).is_ok());
}

#[test]
fn test_label_smoothing_bounds() {
    assert!(check_label_smoothing(0.0).is_ok());
    assert!(check_label_smoothing(1.0).is_ok());
    assert!(check_label_smoothing(0.75).is_ok());
    assert_eq!(
        check_label_smoothing(1.5),
        Err(ValidationError::InvalidLabelSmoothing(1.5))
    );
    assert!(check_label_smoothing(-0.01).is_err());
    assert!(check_label_smoothing(f32::NAN).is_err());
}

#[test]
fn test_non_negative_weights() {
    assert!(check_lambda_dpop(0.0).is_ok());
    assert!(check_lambda_dpop(50.0).is_ok());
    assert_eq!(check_lambda_dpop(-1.0), Err(ValidationError::InvalidLambdaDpop(-1.0)));

    assert!(check_rpo_alpha(1.0).is_ok());
    assert_eq!(check_rpo_alpha(-1.0), Err(ValidationError::InvalidRpoAlpha(-1.0)));

    assert!(check_gamma(0.0).is_ok());
    assert_eq!(check_gamma(-0.5), Err(ValidationError::InvalidGamma(-0.5)));
    assert!(check_gamma(f32::INFINITY).is_err());
}

#[test]
fn test_invalid_tau() {
    assert!(check_tau(0.1).is_ok());
    assert_eq!(check_tau(0.0), Err(ValidationError::InvalidTau(0.0)));
}

#[test]
fn test_spec_reports_first_offending_field() {
    let spec = LossSpec::Rpo(RpoSpec {
        beta: -1.0,
        label_smoothing: 2.0,
        rpo_alpha: -1.0,
    });
    assert_eq!(validate_spec(&spec), Err(ValidationError::InvalidBeta(-1.0)));

    let spec = LossSpec::Simpo(SimpoSpec {
        beta: 2.0,
        gamma: 0.5,
        label_smoothing: 1.2,
    });
    assert_eq!(
        validate_spec(&spec),
        Err(ValidationError::InvalidLabelSmoothing(1.2))
    );
}

#[test]
fn test_error_message_names_hyperparameter() {
    let msg = ValidationError::InvalidRpoAlpha(-2.0).to_string();
    assert!(msg.contains("rpo_alpha"));
    assert!(msg.contains("-2"));
}
