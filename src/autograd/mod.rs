//! Tape-based autograd engine
//!
//! Provides automatic differentiation over one-dimensional tensors using a
//! computational graph recorded as the forward pass runs. Every differentiable
//! op stores a [`BackwardOp`]; [`backward`] replays them in reverse
//! topological order.
//!
//! ```
//! use alinear::autograd::{backward, log_sigmoid, mean};
//! use alinear::Tensor;
//!
//! let x = Tensor::from_vec(vec![0.0, 2.0], true);
//! let mut loss = mean(&log_sigmoid(&x));
//! backward(&mut loss, None);
//!
//! assert!(x.grad().is_some());
//! ```

mod backward;
mod ops;
mod tensor;

#[cfg(test)]
pub(crate) mod tests;

pub use backward::{topological_order, BackwardOp};
pub use ops::*;
pub use tensor::{GradCell, Tensor};

/// Perform backward pass on a tensor
///
/// Seeds the output gradient (ones when `grad_output` is `None`) and runs
/// every op reachable from `tensor` exactly once.
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        // Initialize with ones for scalar loss
        let ones = ndarray::Array1::ones(tensor.data().len());
        tensor.set_grad(ones);
    }

    if let Some(root) = tensor.backward_op() {
        for op in topological_order(root) {
            op.backward();
        }
    }
}
