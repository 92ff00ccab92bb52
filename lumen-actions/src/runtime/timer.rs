use crate::{
    model::{Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
    state::StateKey,
};

/// Delay gate with persistent arming state. A truthy `input` arms the
/// timer on first evaluation; once the configured delay elapses it emits
/// `true` — every cycle when looping (resetting its start time), exactly
/// once otherwise.
pub struct TimerBehavior;

impl NodeBehavior for TimerBehavior {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        let delay_ms = node.field_f64("delay").unwrap_or(1.0) * 1000.0;
        let looping = node.field_bool("loop").unwrap_or(false);

        let now_ms = ctx.now_ms;
        let timer = ctx
            .state
            .timer(StateKey::new(ctx.instance, node.id), now_ms);

        let elapsed = now_ms - timer.start_ms >= delay_ms;
        let output = if !elapsed {
            false
        } else if looping {
            timer.start_ms = now_ms;
            true
        } else if timer.fired {
            false
        } else {
            timer.fired = true;
            true
        };

        Outcome::single("output", Value::Bool(output))
    }
}
