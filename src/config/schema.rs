//! YAML schema definitions for declarative loss configuration
//!
//! A document names the loss with a `type` tag and lists its
//! hyperparameters. Omitted hyperparameters take the defaults below.
//!
//! ```yaml
//! type: dpo
//! beta: 0.1
//! label_smoothing: 0.0
//! lambda_dpop: 0.0
//! ```

use serde::{Deserialize, Serialize};

/// Loss selection and hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LossSpec {
    /// Direct Preference Optimization, with optional DPOP penalty on the logits
    Dpo(DpoSpec),
    /// DPO-Positive, penalty applied to the loss
    Dpop(DpopSpec),
    /// Iterative Reasoning Preference Optimization (DPO + NLL)
    Rpo(RpoSpec),
    /// Statistical Rejection Sampling Optimization (hinge)
    Rso(RsoSpec),
    /// Simple Preference Optimization (reference-free)
    Simpo(SimpoSpec),
    /// Identity Preference Optimization (squared loss)
    Ipo(IpoSpec),
}

impl LossSpec {
    /// Tag used in YAML for this variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dpo(_) => "dpo",
            Self::Dpop(_) => "dpop",
            Self::Rpo(_) => "rpo",
            Self::Rso(_) => "rso",
            Self::Simpo(_) => "simpo",
            Self::Ipo(_) => "ipo",
        }
    }
}

/// DPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DpoSpec {
    /// Temperature, typically 0.1 to 0.5
    pub beta: f32,
    /// Probability that a preference label is flipped
    pub label_smoothing: f32,
    /// Weight of the DPOP penalty folded into the logits
    pub lambda_dpop: f32,
}

impl Default for DpoSpec {
    fn default() -> Self {
        Self {
            beta: 0.1,
            label_smoothing: 0.0,
            lambda_dpop: 0.0,
        }
    }
}

/// DPOP hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DpopSpec {
    pub beta: f32,
    pub lambda_dpop: f32,
}

impl Default for DpopSpec {
    fn default() -> Self {
        Self {
            beta: 0.1,
            lambda_dpop: 0.0,
        }
    }
}

/// RPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpoSpec {
    pub beta: f32,
    pub label_smoothing: f32,
    /// Weight of the chosen-response NLL term
    pub rpo_alpha: f32,
}

impl Default for RpoSpec {
    fn default() -> Self {
        Self {
            beta: 0.1,
            label_smoothing: 0.0,
            rpo_alpha: 1.0,
        }
    }
}

/// RSO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsoSpec {
    /// Hinge scale, the RSO counterpart of DPO's beta
    pub gamma: f32,
}

impl Default for RsoSpec {
    fn default() -> Self {
        Self { gamma: 0.1 }
    }
}

/// SimPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimpoSpec {
    /// Temperature, typically 2.0 to 2.5
    pub beta: f32,
    /// Target reward margin, typically in (0, 1.5]
    pub gamma: f32,
    pub label_smoothing: f32,
}

impl Default for SimpoSpec {
    fn default() -> Self {
        Self {
            beta: 2.0,
            gamma: 0.5,
            label_smoothing: 0.0,
        }
    }
}

/// IPO hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IpoSpec {
    /// Regularization strength; the loss targets a logit of `1 / (2 * tau)`
    pub tau: f32,
}

impl Default for IpoSpec {
    fn default() -> Self {
        Self { tau: 0.1 }
    }
}
