use crate::{
    error::{GraphIssue, IssueKind},
    model::{Graph, NodeId, NodeKind},
};
use std::collections::BTreeSet;

/// Lints a loaded graph and reports everything a careful author would want
/// flagged. The executor tolerates all of these at runtime (stale ids are
/// skipped, unknown nodes produce nothing), but without this pass an
/// authoring mistake silently turns into "nothing happens" in game.
pub fn validate(graph: &Graph) -> Vec<GraphIssue> {
    let mut issues = Vec::new();

    let mut seen = BTreeSet::new();
    for node in graph.nodes.iter() {
        if !seen.insert(node.id) {
            issues.push(GraphIssue::new(IssueKind::DuplicateNodeId).with_node(node.id));
        }
        if node.kind == NodeKind::Unknown {
            issues.push(GraphIssue::new(IssueKind::UnknownNodeType).with_node(node.id));
        }
    }

    for connection in graph.connections.iter() {
        for end in [connection.start_node, connection.end_node] {
            if graph.node(end).is_none() {
                issues.push(GraphIssue::new(IssueKind::DanglingConnection).with_node(end));
            }
        }
    }

    match graph.entry_node() {
        None => {
            if !graph.nodes.is_empty() {
                issues.push(GraphIssue::new(IssueKind::MissingEntry));
            }
        }
        Some(entry) => {
            let reachable = reachable_from(graph, entry);
            for node in graph.nodes.iter() {
                if !reachable.contains(&node.id) {
                    issues.push(GraphIssue::new(IssueKind::UnreachableNode).with_node(node.id));
                }
            }
        }
    }

    issues
}

fn reachable_from(graph: &Graph, entry: NodeId) -> BTreeSet<NodeId> {
    let mut reachable = BTreeSet::new();
    let mut queue = vec![entry];
    while let Some(id) = queue.pop() {
        if !reachable.insert(id) {
            continue;
        }
        for connection in graph.connections_from(id) {
            queue.push(connection.end_node);
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, NodeDescriptor};

    fn graph_with(kinds: &[(u64, NodeKind)]) -> Graph {
        let mut graph = Graph::new();
        for (id, kind) in kinds {
            graph.add_node(NodeDescriptor::new(NodeId(*id), *kind));
        }
        graph
    }

    #[test]
    fn clean_graph_has_no_issues() {
        let mut graph = graph_with(&[(1, NodeKind::Initial), (2, NodeKind::Scene)]);
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));
        assert!(validate(&graph).is_empty());
    }

    #[test]
    fn dangling_connection_is_reported() {
        let mut graph = graph_with(&[(1, NodeKind::Initial)]);
        graph.add_connection(Connection::new(NodeId(1), NodeId(99)));
        let issues = validate(&graph);
        assert!(issues
            .iter()
            .any(|i| i.kind == IssueKind::DanglingConnection && i.node == Some(NodeId(99))));
    }

    #[test]
    fn unreachable_and_unknown_nodes_are_reported() {
        let mut graph = graph_with(&[(1, NodeKind::Initial), (2, NodeKind::Lighting)]);
        graph.add_node(NodeDescriptor::new(NodeId(3), NodeKind::Unknown));
        graph.add_connection(Connection::new(NodeId(1), NodeId(2)));

        let issues = validate(&graph);
        assert!(issues
            .iter()
            .any(|i| i.kind == IssueKind::UnknownNodeType && i.node == Some(NodeId(3))));
        assert!(issues
            .iter()
            .any(|i| i.kind == IssueKind::UnreachableNode && i.node == Some(NodeId(3))));
    }

    #[test]
    fn missing_entry_is_reported_for_nonempty_graph() {
        let graph = graph_with(&[(1, NodeKind::Lighting)]);
        let issues = validate(&graph);
        assert!(issues.iter().any(|i| i.kind == IssueKind::MissingEntry));
        assert!(validate(&Graph::new()).is_empty());
    }
}
