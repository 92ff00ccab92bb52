//! Evaluators for the built-in node types.
//!
//! Each node type lives in its own file and implements [`NodeBehavior`].
//! Evaluators never touch the scene directly; they return [`Effect`]
//! commands for the executor to apply.

mod color;
mod color_transition;
mod condition;
mod direction;
mod gamepad;
mod initial;
mod lighting;
mod movement;
mod plugin;
mod scene;
mod switch;
mod timer;

pub use color::*;
pub use color_transition::*;
pub use condition::*;
pub use direction::*;
pub use gamepad::*;
pub use initial::*;
pub use lighting::*;
pub use movement::*;
pub use plugin::*;
pub use scene::*;
pub use switch::*;
pub use timer::*;

use crate::{
    host::{Effect, InputSnapshot},
    model::{InstanceId, Inputs, NodeDescriptor, NodeKind, Outputs, Value},
    state::RuntimeState,
};

/// Everything one node evaluation may read or (through `state`) mutate.
pub struct EvalContext<'a> {
    pub instance: &'a InstanceId,
    /// Whether the owning object's trigger condition (actor overlap) holds
    /// this frame. Conditional nodes short-circuit when this is `false`.
    pub trigger_active: bool,
    /// Monotonic wall clock in milliseconds, shared by all passes.
    pub now_ms: f64,
    /// Frame delta in milliseconds.
    pub dt_ms: f64,
    /// Pixel-space origin of the owning object, for node-relative offsets.
    pub origin: (f64, f64),
    pub input: &'a dyn InputSnapshot,
    pub state: &'a mut RuntimeState,
}

/// Result of one node evaluation. `outputs: None` means the node produced
/// nothing this pass and downstream propagation stops on this path; that is
/// distinct from an output whose value is `false`.
#[derive(Debug, Default)]
pub struct Outcome {
    pub outputs: Option<Outputs>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn outputs(outputs: Outputs) -> Self {
        Self {
            outputs: Some(outputs),
            effects: Vec::new(),
        }
    }

    pub fn single(name: &str, value: Value) -> Self {
        let mut outputs = Outputs::new();
        outputs.insert(name.to_string(), value);
        Self::outputs(outputs)
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reads the conventional `input` slot as a truthy flag; absent counts as
/// falsy.
pub(crate) fn input_truthy(inputs: &Inputs) -> bool {
    inputs.get("input").is_some_and(Value::is_truthy)
}

pub trait NodeBehavior: Send + Sync {
    fn evaluate(&self, ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome;
}

static INITIAL: InitialBehavior = InitialBehavior;
static GAMEPAD: GamepadBehavior = GamepadBehavior;
static SCENE: SceneBehavior = SceneBehavior;
static CONDITION: ConditionBehavior = ConditionBehavior;
static TIMER: TimerBehavior = TimerBehavior;
static SWITCH: SwitchBehavior = SwitchBehavior;
static DIRECTION: DirectionBehavior = DirectionBehavior;
static MOVEMENT: MoveBehavior = MoveBehavior;
static LIGHTING: LightingBehavior = LightingBehavior;
static COLOR: ColorBehavior = ColorBehavior;
static COLOR_TRANSITION: ColorTransitionBehavior = ColorTransitionBehavior;
static PLUGIN: PluginBehavior = PluginBehavior;

pub fn behavior_for(kind: NodeKind) -> Option<&'static dyn NodeBehavior> {
    match kind {
        NodeKind::Initial => Some(&INITIAL),
        NodeKind::Gamepad => Some(&GAMEPAD),
        NodeKind::Scene => Some(&SCENE),
        NodeKind::Condition => Some(&CONDITION),
        NodeKind::Timer => Some(&TIMER),
        NodeKind::Switch => Some(&SWITCH),
        NodeKind::Direction => Some(&DIRECTION),
        NodeKind::Move => Some(&MOVEMENT),
        NodeKind::Lighting => Some(&LIGHTING),
        NodeKind::Color => Some(&COLOR),
        NodeKind::ColorTransition => Some(&COLOR_TRANSITION),
        NodeKind::Plugin => Some(&PLUGIN),
        NodeKind::Unknown => None,
    }
}

/// Evaluates one node: applies the conditional-node gate, then dispatches
/// to the type's behavior. Unknown types produce nothing.
pub fn evaluate_node(ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
    if node.kind.is_conditional() && !ctx.trigger_active {
        return Outcome::silent();
    }

    match behavior_for(node.kind) {
        Some(behavior) => behavior.evaluate(ctx, node, inputs),
        None => {
            log::warn!("node {} has an unknown type; skipping", node.id);
            Outcome::silent()
        }
    }
}
