use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a node within one graph. Assigned by the authoring
/// tool, never reused while the graph is loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the interactive world object owning a graph, e.g. `item_42`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of node types understood by the executor.
///
/// A stale tag written by an older authoring tool deserializes to `Unknown`
/// instead of failing the whole graph; the evaluator treats such nodes as
/// producing nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Initial,
    Gamepad,
    Scene,
    Condition,
    Timer,
    Switch,
    Direction,
    Move,
    Lighting,
    Color,
    ColorTransition,
    Plugin,
    Unknown,
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(NodeKind::from_tag(&tag))
    }
}

impl NodeKind {
    /// Maps a serialized type tag onto the closed set; anything else is
    /// `Unknown` rather than a load failure.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "initial" => NodeKind::Initial,
            "gamepad" => NodeKind::Gamepad,
            "scene" => NodeKind::Scene,
            "condition" => NodeKind::Condition,
            "timer" => NodeKind::Timer,
            "switch" => NodeKind::Switch,
            "direction" => NodeKind::Direction,
            "move" => NodeKind::Move,
            "lighting" => NodeKind::Lighting,
            "color" => NodeKind::Color,
            "colortransition" => NodeKind::ColorTransition,
            "plugin" => NodeKind::Plugin,
            _ => NodeKind::Unknown,
        }
    }
    /// Conditional nodes short-circuit when the trigger condition (spatial
    /// overlap with the actor) is not active. Unconditional nodes keep
    /// evaluating so ambient visuals animate even when the actor is away.
    pub fn is_conditional(self) -> bool {
        !matches!(
            self,
            NodeKind::Initial | NodeKind::Lighting | NodeKind::Color | NodeKind::ColorTransition
        )
    }

    /// `initial` and `gamepad` outputs propagate downstream even when the
    /// produced value is absent or `false`, so `condition`/`timer` nodes can
    /// observe "armed but not firing" ticks.
    pub fn propagates_undefined(self) -> bool {
        matches!(self, NodeKind::Initial | NodeKind::Gamepad)
    }
}

/// Static configuration value of a node field, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One typed node as authored: identity, type tag and type-specific fields.
/// Immutable once loaded; derived runtime state lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl NodeDescriptor {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn field_bool(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(FieldValue::as_bool)
    }

    pub fn field_f64(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_f64)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_str)
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) -> &mut Self {
        self.fields.insert(name.to_string(), value);
        self
    }
}

fn default_output() -> String {
    "output".to_string()
}

fn default_input() -> String {
    "input".to_string()
}

/// Directed edge from one node's named output to another node's named input.
/// Outputs may fan out to many targets; several connections may feed the
/// same target node under different input names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "startNode")]
    pub start_node: NodeId,
    #[serde(rename = "startOutput", default = "default_output")]
    pub start_output: String,
    #[serde(rename = "endNode")]
    pub end_node: NodeId,
    #[serde(rename = "endInput", default = "default_input")]
    pub end_input: String,
}

impl Connection {
    pub fn new(start_node: NodeId, end_node: NodeId) -> Self {
        Self {
            start_node,
            start_output: default_output(),
            end_node,
            end_input: default_input(),
        }
    }

    pub fn from_output(mut self, name: &str) -> Self {
        self.start_output = name.to_string();
        self
    }

    pub fn into_input(mut self, name: &str) -> Self {
        self.end_input = name.to_string();
        self
    }
}

/// The node + connection definition attached to one interactive world
/// object. Read-only to the executor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: NodeDescriptor) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Linear lookup; graphs authored in the editor stay small.
    pub fn node(&self, id: NodeId) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeDescriptor> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The graph's entry point: its first `initial` node.
    pub fn entry_node(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find_map(|n| (n.kind == NodeKind::Initial).then_some(n.id))
    }

    pub fn connections_from(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.start_node == id)
    }

    pub fn connections_to(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.end_node == id)
    }
}

/// Direction snapshot from the left stick / d-pad.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A direction value flowing through the graph: the trigger truthiness of
/// the `direction` node's own input, plus the stick flags it sampled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionSignal {
    pub active: bool,
    pub flags: DirectionFlags,
}

/// A value flowing along a connection during one pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    Direction(DirectionSignal),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Direction(d) => d.active,
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Text(s) => s.parse().unwrap_or(0.0),
            Value::Direction(d) => {
                if d.active {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Named inputs resolved for one node evaluation.
pub type Inputs = BTreeMap<String, Value>;

/// Named outputs produced by one node evaluation.
pub type Outputs = BTreeMap<String, Value>;
