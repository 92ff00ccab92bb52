use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

/// Emits the node's configured static hex color, typically feeding a
/// `lighting` node's `color` input.
pub struct ColorBehavior;

impl NodeBehavior for ColorBehavior {
    fn evaluate(&self, _ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        let color = node.field_str("color").unwrap_or("#ffffff");
        Outcome::single("output", Value::Text(color.to_string()))
    }
}
