use crate::{
    host::Effect,
    model::{Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

/// Scene transition. Requires a truthy `input`; on success emits a
/// `ChangeScene` command with the configured target and optional start
/// coordinates.
pub struct SceneBehavior;

impl NodeBehavior for SceneBehavior {
    fn evaluate(&self, _ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        let Some(scene) = node.field_str("scene") else {
            log::warn!("scene node {} has no target scene configured", node.id);
            return Outcome::silent();
        };

        let start = match (node.field_f64("x"), node.field_f64("y")) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };

        Outcome::single("output", Value::Bool(true)).with_effect(Effect::ChangeScene {
            scene: scene.to_string(),
            start,
        })
    }
}
