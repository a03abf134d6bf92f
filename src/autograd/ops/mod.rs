//! Autograd operations with backward passes
//!
//! This module provides differentiable operations for automatic differentiation.

mod activations;
mod basic;

// Re-export all public operations
pub use activations::{
    clamp_min, log_sigmoid, log_sigmoid_scalar, maximum, relu, sigmoid_scalar,
};
pub use basic::{add, add_scalar, mean, mul, scale, sub, sum};
