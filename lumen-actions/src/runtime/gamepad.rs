use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{EvalContext, NodeBehavior, Outcome},
};

const DEFAULT_THROTTLE_MS: f64 = 1000.0;

/// Gate node reading a named button from the input snapshot, rate-limited
/// through the throttle registry so a held button fires at most once per
/// window. Only a truthy evaluation resets the throttle clock; while
/// throttled the node reports `false` without touching it.
pub struct GamepadBehavior;

impl NodeBehavior for GamepadBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, _inputs: &Inputs) -> Outcome {
        let button = node.field_str("button").unwrap_or("a");
        let delay_ms = node
            .field_f64("throttle_delay")
            .unwrap_or(DEFAULT_THROTTLE_MS);
        let key = format!("gamepad_{button}");

        let fired = ctx.input.is_held(button)
            && ctx.state.throttle_ready(&key, delay_ms, ctx.now_ms);
        if fired {
            ctx.state.throttle_mark(&key, ctx.now_ms);
        }

        Outcome::single("output", Value::Bool(fired))
    }
}
