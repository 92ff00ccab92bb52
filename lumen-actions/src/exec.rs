//! One evaluation pass over a graph: depth-first push propagation with an
//! at-most-once-per-node guard.

use crate::{
    host::{Effect, EffectSink, WorldAccessor},
    model::{Graph, Inputs, InstanceId, NodeId, Value},
    runtime::{evaluate_node, EvalContext},
};
use std::collections::{BTreeMap, BTreeSet};

/// Pass-scoped arena: the outputs produced so far and the set of nodes
/// already evaluated. Constructed fresh for every pass and discarded at the
/// end, so two objects evaluated in the same frame can never share entries.
#[derive(Debug, Default)]
struct EvaluationPass {
    visited: BTreeSet<NodeId>,
    outputs: BTreeMap<(NodeId, String), Value>,
}

/// Runs one full pass starting at `entry`. Each node evaluates at most
/// once regardless of how many paths reach it; a node producing nothing
/// stops propagation along its own outgoing edges only.
pub fn execute_graph(
    graph: &Graph,
    entry: NodeId,
    ctx: &mut EvalContext,
    sink: &mut dyn EffectSink,
    world: &mut dyn WorldAccessor,
) {
    let mut pass = EvaluationPass::default();
    process_node(graph, entry, Inputs::new(), &mut pass, ctx, sink, world);
}

fn process_node(
    graph: &Graph,
    node_id: NodeId,
    inputs: Inputs,
    pass: &mut EvaluationPass,
    ctx: &mut EvalContext,
    sink: &mut dyn EffectSink,
    world: &mut dyn WorldAccessor,
) {
    // Cycle / diamond guard.
    if !pass.visited.insert(node_id) {
        return;
    }

    let Some(node) = graph.node(node_id) else {
        // Editors can briefly leave connections pointing at deleted nodes.
        log::debug!("skipping connection to missing node {node_id}");
        return;
    };

    let outcome = evaluate_node(ctx, node, &inputs);
    for effect in outcome.effects {
        apply_effect(ctx.instance, effect, sink, world);
    }

    let Some(outputs) = outcome.outputs else {
        return;
    };
    for (name, value) in outputs {
        pass.outputs.insert((node_id, name), value);
    }

    for connection in graph.connections_from(node_id) {
        let produced = pass
            .outputs
            .get(&(node_id, connection.start_output.clone()))
            .cloned();
        let value = match produced {
            Some(value) => value,
            // `initial`/`gamepad` ticks reach downstream nodes even when the
            // named output carries nothing, so `condition`/`timer` can
            // observe "armed but not firing" frames.
            None if node.kind.propagates_undefined() => Value::Bool(false),
            None => continue,
        };

        let mut next_inputs = ready_inputs(graph, connection.end_node, pass);
        next_inputs.insert(connection.end_input.clone(), value);
        process_node(graph, connection.end_node, next_inputs, pass, ctx, sink, world);
    }
}

/// Collects every upstream value already produced this pass that feeds
/// `target`, so fan-in nodes see all available inputs regardless of
/// traversal order.
fn ready_inputs(graph: &Graph, target: NodeId, pass: &EvaluationPass) -> Inputs {
    let mut inputs = Inputs::new();
    for connection in graph.connections_to(target) {
        if let Some(value) = pass
            .outputs
            .get(&(connection.start_node, connection.start_output.clone()))
        {
            inputs.insert(connection.end_input.clone(), value.clone());
        }
    }
    inputs
}

fn apply_effect(
    instance: &InstanceId,
    effect: Effect,
    sink: &mut dyn EffectSink,
    world: &mut dyn WorldAccessor,
) {
    match effect {
        Effect::SetLight(light) => sink.set_light(&light),
        Effect::RemoveLight { id } => sink.remove_light(&id),
        Effect::ChangeScene { scene, start } => sink.change_scene(&scene, start),
        Effect::MoveObject { dx, dy } => world.mutate_position(instance, dx, dy),
        Effect::LoadPlugin { id, options } => sink.load_plugin(&id, &options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, FieldValue, NodeDescriptor, NodeKind};
    use crate::state::RuntimeState;
    use crate::testutil::{RecordingSink, TestInput, TestWorld};

    fn node(id: u64, kind: NodeKind) -> NodeDescriptor {
        NodeDescriptor::new(NodeId(id), kind)
    }

    fn run_pass(
        graph: &Graph,
        state: &mut RuntimeState,
        input: &TestInput,
        trigger_active: bool,
        now_ms: f64,
    ) -> (RecordingSink, TestWorld) {
        let mut sink = RecordingSink::default();
        let mut world = TestWorld::default();
        let instance = InstanceId::new("item_1");
        let mut ctx = EvalContext {
            instance: &instance,
            trigger_active,
            now_ms,
            dt_ms: 16.0,
            origin: (0.0, 0.0),
            input,
            state,
        };
        let entry = graph.entry_node().expect("graph has an initial node");
        execute_graph(graph, entry, &mut ctx, &mut sink, &mut world);
        (sink, world)
    }

    #[test]
    fn diamond_reconvergence_evaluates_target_once() {
        // 1 (initial) fans out to two color nodes which both feed 4.
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        let mut red = node(2, NodeKind::Color);
        red.set_field("color", FieldValue::Text("#ff0000".into()));
        graph.add_node(red);
        graph.add_node(node(3, NodeKind::Color));
        graph.add_node(node(4, NodeKind::Lighting));
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        graph.add_connection(Connection::new(NodeId(1), NodeId(3)));
        graph.add_connection(Connection::new(NodeId(2), NodeId(4)).into_input("color"));
        graph.add_connection(Connection::new(NodeId(3), NodeId(4)).into_input("input"));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        assert_eq!(sink.lights.len(), 1);
    }

    #[test]
    fn cyclic_graph_terminates_with_one_visit_per_node() {
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        graph.add_node(node(2, NodeKind::Lighting));
        graph.add_node(node(3, NodeKind::Lighting));
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        graph.add_connection(Connection::new(NodeId(2), NodeId(3)));
        graph.add_connection(Connection::new(NodeId(3), NodeId(2)));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        assert_eq!(sink.lights.len(), 2);
    }

    #[test]
    fn trigger_inactive_keeps_unconditional_nodes_alive_only() {
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        graph.add_node(node(2, NodeKind::Lighting));
        let mut scene = node(3, NodeKind::Scene);
        scene.set_field("scene", FieldValue::Text("scene2".into()));
        graph.add_node(scene);
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        graph.add_connection(Connection::new(NodeId(1), NodeId(3)));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), false, 0.0);
        assert_eq!(sink.lights.len(), 1, "lighting keeps animating");
        assert!(sink.scenes.is_empty(), "scene must not fire out of range");
    }

    #[test]
    fn condition_routes_exactly_one_branch() {
        // initial emits true (numeric 1); condition equals 1 -> true branch.
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        let mut condition = node(2, NodeKind::Condition);
        condition.set_field("operator", FieldValue::Text("equals".into()));
        condition.set_field("value", FieldValue::Number(1.0));
        graph.add_node(condition);
        let mut on_true = node(3, NodeKind::Scene);
        on_true.set_field("scene", FieldValue::Text("scene_true".into()));
        graph.add_node(on_true);
        let mut on_false = node(4, NodeKind::Scene);
        on_false.set_field("scene", FieldValue::Text("scene_false".into()));
        graph.add_node(on_false);
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        graph.add_connection(Connection::new(NodeId(2), NodeId(3)).from_output("true"));
        graph.add_connection(Connection::new(NodeId(2), NodeId(4)).from_output("false"));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        assert_eq!(sink.scenes.len(), 1);
        assert_eq!(sink.scenes[0].0, "scene_true");
    }

    #[test]
    fn gamepad_false_still_ticks_downstream_nodes() {
        // Button not held: gamepad emits false, which must still reach the
        // switch (read-only on falsy input) rather than stopping there.
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        let mut pad = node(2, NodeKind::Gamepad);
        pad.set_field("button", FieldValue::Text("a".into()));
        graph.add_node(pad);
        graph.add_node(node(3, NodeKind::Switch));
        graph.add_node(node(4, NodeKind::Lighting));
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        graph.add_connection(Connection::new(NodeId(2), NodeId(3)));
        graph.add_connection(Connection::new(NodeId(3), NodeId(4)));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        // Switch stayed false, so the lighting node saw a falsy input and
        // removed its light instead of upserting it.
        assert_eq!(sink.removed, vec!["item_1_light_4".to_string()]);
        assert!(sink.lights.is_empty());
    }

    #[test]
    fn connection_to_missing_node_is_skipped() {
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        graph.add_node(node(2, NodeKind::Lighting));
        graph.add_connection(Connection::new(NodeId(1), NodeId(99)));
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));

        let mut state = RuntimeState::new();
        let (sink, _) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        assert_eq!(sink.lights.len(), 1);
    }

    #[test]
    fn move_node_displaces_owning_object() {
        let mut graph = Graph::new();
        graph.add_node(node(1, NodeKind::Initial));
        let mut mover = node(2, NodeKind::Move);
        mover.set_field("speed", FieldValue::Number(160.0));
        mover.set_field("right", FieldValue::Bool(true));
        graph.add_node(mover);
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));

        let mut state = RuntimeState::new();
        let (_, world) = run_pass(&graph, &mut state, &TestInput::default(), true, 0.0);
        // 160 px/s * 16 ms = 2.56 px = 0.16 grid units along +x.
        assert_eq!(world.moves.len(), 1);
        let (_, dx, dy) = &world.moves[0];
        assert!((dx - 0.16).abs() < 1e-9);
        assert_eq!(*dy, 0.0);
    }
}
