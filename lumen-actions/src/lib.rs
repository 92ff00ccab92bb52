#![forbid(unsafe_code)]

//! Runtime node-graph action engine: typed node descriptors and connections
//! authored per interactive world object, evaluated once per object per
//! frame with at-most-once-per-pass semantics, persistent per-node state
//! and side effects expressed as commands for the host to apply.

pub mod error;
pub mod exec;
pub mod host;
pub mod model;
pub mod rgb;
pub mod runtime;
pub mod state;
pub mod validate;

pub use crate::{
    error::{GraphIssue, IssueKind},
    exec::execute_graph,
    host::{Aabb, Effect, EffectSink, InputSnapshot, LightParams, PluginOptions, WorldAccessor, TILE_SIZE},
    model::{
        Connection, DirectionFlags, DirectionSignal, FieldValue, Graph, Inputs, InstanceId,
        NodeDescriptor, NodeId, NodeKind, Outputs, Value,
    },
    rgb::Rgb,
    runtime::{behavior_for, evaluate_node, EvalContext, NodeBehavior, Outcome},
    state::{RuntimeState, StateKey, TimerState},
    validate::validate,
};
