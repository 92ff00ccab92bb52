use crate::{
    model::{FieldValue, Inputs, NodeDescriptor, Value},
    rgb::{parse_hex, Rgb},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

/// Cycles through an ordered list of configured colors on a wall-clock
/// phase, linearly interpolating RGB channels between the current color and
/// the next. Pure function of time and configuration.
pub struct ColorTransitionBehavior;

impl NodeBehavior for ColorTransitionBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        let colors: Vec<Rgb> = node
            .field("colors")
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().and_then(parse_hex))
                    .collect()
            })
            .unwrap_or_default();

        if colors.is_empty() {
            return Outcome::silent();
        }
        if colors.len() == 1 {
            return Outcome::single("output", Value::Text(colors[0].to_string()));
        }

        let speed = node.field_f64("speed").unwrap_or(1.0);
        let phase = ctx.now_ms / 1000.0 * speed;
        let index = (phase.floor() as usize) % colors.len();
        let next = (index + 1) % colors.len();
        let blended = Rgb::lerp(colors[index], colors[next], phase.fract());

        Outcome::single("output", Value::Text(blended.to_string()))
    }
}
