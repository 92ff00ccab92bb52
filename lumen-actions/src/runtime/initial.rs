use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{EvalContext, NodeBehavior, Outcome},
};

/// Entry node: the graph's unconditional clock-tick seed. Always emits
/// `{output: true}`, whether or not the actor is nearby.
pub struct InitialBehavior;

impl NodeBehavior for InitialBehavior {
    fn evaluate(&self, _ctx: &mut EvalContext, _node: &NodeDescriptor, _inputs: &Inputs) -> Outcome {
        Outcome::single("output", Value::Bool(true))
    }
}
