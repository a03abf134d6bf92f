//! Activation autograd operations: relu, clamp_min, maximum, log_sigmoid

use crate::autograd::{BackwardOp, GradCell, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// ReLU activation
pub fn relu(a: &Tensor) -> Tensor {
    let data = a.data().mapv(|x| x.max(0.0));
    let mask = a.data().mapv(|x| if x > 0.0 { 1.0 } else { 0.0 });
    masked(a, data, mask)
}

/// Clamp every element from below: `max(x, min)`
///
/// The gradient passes wherever `x >= min`.
pub fn clamp_min(a: &Tensor, min: f32) -> Tensor {
    let data = a.data().mapv(|x| x.max(min));
    let mask = a.data().mapv(|x| if x >= min { 1.0 } else { 0.0 });
    masked(a, data, mask)
}

/// Element-wise `max(x, floor)` against a constant
///
/// At a tie the gradient is split evenly between `x` and the constant, so `x`
/// receives half of it. Above `floor` it receives all of it, below none.
pub fn maximum(a: &Tensor, floor: f32) -> Tensor {
    let data = a.data().mapv(|x| x.max(floor));
    let mask = a.data().mapv(|x| {
        if x > floor {
            1.0
        } else if x == floor {
            0.5
        } else {
            0.0
        }
    });
    masked(a, data, mask)
}

fn masked(a: &Tensor, data: Array1<f32>, mask: Array1<f32>) -> Tensor {
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(MaskBackward {
            a: a.clone(),
            mask,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct MaskBackward {
    a: Tensor,
    mask: Array1<f32>,
    result_grad: GradCell,
}

impl BackwardOp for MaskBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // ∂L/∂a = ∂L/∂out * 1[pass]
                let grad_a = grad * &self.mask;
                self.a.accumulate_grad(grad_a);
            }
        }
    }

    fn inputs(&self) -> Vec<&Tensor> {
        vec![&self.a]
    }
}

/// Numerically stable `log(σ(x))`
///
/// Uses `min(x, 0) - ln(1 + e^(-|x|))`, which never exponentiates a positive
/// number and stays finite for any finite `x`.
pub fn log_sigmoid_scalar(x: f32) -> f32 {
    x.min(0.0) - (-x.abs()).exp().ln_1p()
}

/// Numerically stable `σ(x)`
pub fn sigmoid_scalar(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp_x = x.exp();
        exp_x / (1.0 + exp_x)
    }
}

/// Log-sigmoid activation
///
/// `log_sigmoid(x) = -softplus(-x)`, gradient `σ(-x)`.
pub fn log_sigmoid(a: &Tensor) -> Tensor {
    let data = a.data().mapv(log_sigmoid_scalar);
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(LogSigmoidBackward {
            a: a.clone(),
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct LogSigmoidBackward {
    a: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for LogSigmoidBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // ∂log σ(x)/∂x = 1 - σ(x) = σ(-x)
                let grad_a = grad * &self.a.data().mapv(|x| sigmoid_scalar(-x));
                self.a.accumulate_grad(grad_a);
            }
        }
    }

    fn inputs(&self) -> Vec<&Tensor> {
        vec![&self.a]
    }
}
