use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
    state::StateKey,
};

/// Persistent toggle. Every truthy-`input` evaluation flips the stored
/// state; a falsy `input` reads the last state back without flipping.
pub struct SwitchBehavior;

impl NodeBehavior for SwitchBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        let key = StateKey::new(ctx.instance, node.id);
        let state = if input_truthy(inputs) {
            ctx.state.flip_switch(key)
        } else {
            ctx.state.switch(&key)
        };
        Outcome::single("output", Value::Bool(state))
    }
}
