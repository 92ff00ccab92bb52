//! Per-frame proximity/trigger scan over every world object carrying an
//! action graph.

use lumen_actions::{
    execute_graph, validate, EffectSink, EvalContext, Graph, InputSnapshot, InstanceId,
    RuntimeState, WorldAccessor,
};
use std::collections::BTreeMap;

/// Owns the loaded graphs, the persistent runtime state and the action
/// clock for one scene. The host render loop calls [`ActionRuntime::tick`]
/// once per frame.
#[derive(Debug, Default)]
pub struct ActionRuntime {
    graphs: BTreeMap<InstanceId, Graph>,
    state: RuntimeState,
    clock_ms: f64,
}

impl ActionRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the action graph for one interactive object, replacing any
    /// previous one. Lint findings are logged; a flawed graph still runs
    /// with the flawed parts skipped.
    pub fn insert_graph(&mut self, instance: InstanceId, graph: Graph) {
        for issue in validate(&graph) {
            log::warn!("{instance}: {issue}");
        }
        self.graphs.insert(instance, graph);
    }

    /// Loads a graph from its serialized JSON definition.
    pub fn load_graph_json(&mut self, instance: InstanceId, json: &str) -> serde_json::Result<()> {
        let graph: Graph = serde_json::from_str(json)?;
        self.insert_graph(instance, graph);
        Ok(())
    }

    /// Unregisters an object's graph and drops its persistent node state.
    pub fn remove_graph(&mut self, instance: &InstanceId) {
        self.graphs.remove(instance);
        self.state.clear_instance(instance);
    }

    pub fn graph(&self, instance: &InstanceId) -> Option<&Graph> {
        self.graphs.get(instance)
    }

    /// Runs one pass for every registered graph. Non-overlapping objects
    /// are not skipped: their graphs still execute with the trigger
    /// inactive so unconditional nodes (lights, color cycling) keep
    /// animating; each node's own classification decides whether it acts.
    pub fn tick(
        &mut self,
        dt_ms: f64,
        input: &dyn InputSnapshot,
        world: &mut dyn WorldAccessor,
        sink: &mut dyn EffectSink,
    ) {
        self.clock_ms += dt_ms;

        let Some(actor) = world.actor_box() else {
            // No active sprite this frame; retried next tick.
            log::debug!("action tick skipped: no actor in world");
            return;
        };

        for (instance, graph) in self.graphs.iter() {
            let Some(bounds) = world.bounding_box_of(instance) else {
                continue;
            };
            let Some(entry) = graph.entry_node() else {
                continue;
            };

            let mut ctx = EvalContext {
                instance,
                trigger_active: bounds.overlaps(&actor),
                now_ms: self.clock_ms,
                dt_ms,
                origin: (bounds.min_x, bounds.min_y),
                input,
                state: &mut self.state,
            };
            execute_graph(graph, entry, &mut ctx, sink, world);
        }
    }
}
