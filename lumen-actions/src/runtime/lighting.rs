use crate::{
    host::{Effect, LightParams},
    model::{Inputs, NodeDescriptor, Value},
    rgb::{parse_hex, Rgb},
    runtime::{EvalContext, NodeBehavior, Outcome},
};

const DEFAULT_RADIUS: f64 = 200.0;
const DEFAULT_INTENSITY: f64 = 1.0;

/// Creates or updates a persistent light owned by this node, keyed
/// `<instance>_light_<node>`. Unconditional: the light keeps updating while
/// the actor is away. An explicitly connected falsy `input` removes it.
pub struct LightingBehavior;

impl NodeBehavior for LightingBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        let id = format!("{}_light_{}", ctx.instance, node.id);

        if let Some(input) = inputs.get("input") {
            if !input.is_truthy() {
                return Outcome::single("output", Value::Bool(false))
                    .with_effect(Effect::RemoveLight { id });
            }
        }

        let color = inputs
            .get("color")
            .and_then(Value::as_text)
            .and_then(parse_hex)
            .unwrap_or(Rgb::WHITE);

        let light = LightParams {
            id,
            x: ctx.origin.0 + node.field_f64("offset_x").unwrap_or(0.0),
            y: ctx.origin.1 + node.field_f64("offset_y").unwrap_or(0.0),
            radius: node.field_f64("radius").unwrap_or(DEFAULT_RADIUS),
            color,
            intensity: node.field_f64("intensity").unwrap_or(DEFAULT_INTENSITY),
            flicker: node.field_bool("flicker").unwrap_or(false),
        };

        Outcome::single("output", Value::Bool(true)).with_effect(Effect::SetLight(light))
    }
}
