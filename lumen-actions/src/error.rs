use crate::model::NodeId;
use thiserror::Error;

/// Non-fatal findings from the graph lint pass. The runtime recovers from
/// all of these locally, so they are diagnostics rather than load failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    #[error("duplicate node id")]
    DuplicateNodeId,

    #[error("unknown node type")]
    UnknownNodeType,

    #[error("connection references a missing node")]
    DanglingConnection,

    #[error("graph has no initial node")]
    MissingEntry,

    #[error("node is unreachable from the entry node")]
    UnreachableNode,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} (node={node:?})")]
pub struct GraphIssue {
    pub kind: IssueKind,
    pub node: Option<NodeId>,
}

impl GraphIssue {
    pub fn new(kind: IssueKind) -> Self {
        Self { kind, node: None }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }
}
