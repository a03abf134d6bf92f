//! Backward operation trait and graph traversal

use super::Tensor;
use std::collections::HashSet;
use std::rc::Rc;

/// A node in the computational graph that knows how to push its output
/// gradient into the gradients of its inputs.
pub trait BackwardOp {
    /// Propagate the gradient stored on this op's output into its inputs.
    ///
    /// Implementations only touch their direct inputs; ordering across the
    /// graph is handled by [`topological_order`].
    fn backward(&self);

    /// Direct inputs of this op
    fn inputs(&self) -> Vec<&Tensor>;
}

fn node_key(op: &Rc<dyn BackwardOp>) -> *const () {
    Rc::as_ptr(op).cast::<()>()
}

/// Order every op reachable from `root` so that each op comes before the ops
/// that produced its inputs.
///
/// A tensor consumed by several ops therefore has its gradient fully
/// accumulated before its own producer runs.
pub fn topological_order(root: Rc<dyn BackwardOp>) -> Vec<Rc<dyn BackwardOp>> {
    let mut visited: HashSet<*const ()> = HashSet::new();
    let mut post_order = Vec::new();
    let mut stack: Vec<(Rc<dyn BackwardOp>, bool)> = vec![(root, false)];

    while let Some((op, expanded)) = stack.pop() {
        if expanded {
            post_order.push(op);
            continue;
        }
        if !visited.insert(node_key(&op)) {
            continue;
        }

        let children: Vec<Rc<dyn BackwardOp>> = op
            .inputs()
            .into_iter()
            .filter_map(Tensor::backward_op)
            .filter(|child| !visited.contains(&node_key(child)))
            .collect();

        stack.push((op, true));
        stack.extend(children.into_iter().map(|child| (child, false)));
    }

    post_order.reverse();
    post_order
}
