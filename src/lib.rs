//! Alinear: preference-optimization losses for LLM fine-tuning
//!
//! Built on a small tape-based autograd engine over `ndarray` vectors. Each
//! loss takes per-example log-probabilities of a chosen and a rejected
//! response and returns a differentiable per-example loss together with
//! detached reward diagnostics.
//!
//! # Modules
//!
//! - [`autograd`]: tensors, differentiable ops and the backward pass
//! - [`rlhf`]: DPO, DPOP, RPO, RSO, SimPO and IPO losses plus batch metrics
//! - [`config`]: YAML loss selection and hyperparameter validation
//! - [`error`]: crate-wide error type
//!
//! # Example
//!
//! ```
//! use alinear::autograd::backward;
//! use alinear::rlhf::{DPOConfig, DPOLoss, PreferenceBatch, PreferenceLoss, PreferenceMetrics};
//! use alinear::Tensor;
//!
//! let policy_chosen = Tensor::from_vec(vec![-1.0, -0.8], true);
//! let policy_rejected = Tensor::from_vec(vec![-2.0, -0.6], true);
//!
//! let batch = PreferenceBatch::new(policy_chosen.clone(), policy_rejected.clone())?
//!     .with_reference(
//!         Tensor::from_vec(vec![-1.5, -0.9], false),
//!         Tensor::from_vec(vec![-2.5, -0.9], false),
//!     )?;
//!
//! let loss_fn = DPOLoss::new(DPOConfig::new(0.1, 0.0, 0.0)?);
//! let output = loss_fn.forward(&batch)?;
//! let metrics = PreferenceMetrics::compute(&output);
//!
//! let mut loss = output.mean_loss();
//! backward(&mut loss, None);
//!
//! assert!(policy_chosen.grad().is_some());
//! assert!(metrics.accuracy >= 0.0);
//! # Ok::<(), alinear::Error>(())
//! ```

pub mod autograd;
pub mod config;
pub mod error;
pub mod rlhf;

pub use autograd::Tensor;
pub use error::{Error, Result};
