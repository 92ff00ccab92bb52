use crate::{
    host::{Effect, TILE_SIZE},
    model::{DirectionFlags, Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

const DEFAULT_SPEED: f64 = 60.0;

/// Moves the owning object by a frame-delta displacement: `speed` pixels
/// per second, converted to grid units, along the axes implied by the
/// direction flags. Driven either by a plain truthy `input` (using the
/// node's own configured flags) or by an active `direction` signal.
pub struct MoveBehavior;

impl NodeBehavior for MoveBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        let steering = inputs.get("direction").and_then(|value| match value {
            Value::Direction(signal) => Some(*signal),
            _ => None,
        });

        let driven = input_truthy(inputs) || steering.is_some_and(|s| s.active);
        if !driven {
            return Outcome::silent();
        }

        let flags = steering.map(|s| s.flags).unwrap_or(DirectionFlags {
            up: node.field_bool("up").unwrap_or(false),
            down: node.field_bool("down").unwrap_or(false),
            left: node.field_bool("left").unwrap_or(false),
            right: node.field_bool("right").unwrap_or(false),
        });

        let speed = node.field_f64("speed").unwrap_or(DEFAULT_SPEED);
        let step = speed * ctx.dt_ms / 1000.0 / TILE_SIZE;
        let dx = (i32::from(flags.right) - i32::from(flags.left)) as f64 * step;
        let dy = (i32::from(flags.down) - i32::from(flags.up)) as f64 * step;

        let outcome = Outcome::single("output", Value::Bool(true));
        if dx == 0.0 && dy == 0.0 {
            outcome
        } else {
            outcome.with_effect(Effect::MoveObject { dx, dy })
        }
    }
}
