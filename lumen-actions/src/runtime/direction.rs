use crate::{
    model::{DirectionSignal, Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

/// Samples the left-stick/d-pad direction and passes it downstream together
/// with the original trigger, so a `move` node receives both "move now" and
/// the vector in one value.
pub struct DirectionBehavior;

impl NodeBehavior for DirectionBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, _node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        Outcome::single(
            "output",
            Value::Direction(DirectionSignal {
                active: true,
                flags: ctx.input.direction_flags(),
            }),
        )
    }
}
