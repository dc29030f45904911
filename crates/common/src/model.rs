use derive_more::{Display, From};
use graph_layout::{build_graph, LayoutGraph, Point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const DEFAULT_NODE_TYPE: &str = "custom";
pub const DEFAULT_SHAPE: &str = "circle";
pub const DEFAULT_NODE_COLOR: &str = "#3b82f6";
pub const DEFAULT_EDGE_COLOR: &str = "#64748b";
pub const DEFAULT_THICKNESS: f64 = 2.0;
pub const DEFAULT_SOURCE_HANDLE: &str = "bottom-source";
pub const DEFAULT_TARGET_HANDLE: &str = "top";

#[derive(
    Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(
    Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Point::new(position.x, position.y)
    }
}

/// Display data of a node
///
/// Only `label` means anything to the editor, everything else is carried
/// along for the renderer. Unknown keys are kept as is.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn shape_or_default(&self) -> &str {
        self.shape.as_deref().unwrap_or(DEFAULT_SHAPE)
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default = "default_node_type")]
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_node_type() -> String {
    DEFAULT_NODE_TYPE.to_string()
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind: default_node_type(),
            position,
            data,
            extra: Map::new(),
        }
    }

    /// The single node every new workspace starts with
    pub fn seed() -> Self {
        Self::new(
            "1",
            Position::new(250.0, 250.0),
            NodeData {
                label: "Central Concept".to_string(),
                shape: Some(DEFAULT_SHAPE.to_string()),
                color: Some(DEFAULT_NODE_COLOR.to_string()),
                icon: Some("Brain".to_string()),
                tags: vec!["main".to_string()],
                notes: "This is the central concept of your map".to_string(),
                extra: Map::new(),
            },
        )
    }
}

/// How an edge is drawn, only meaningful to the renderer
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Straight,
    Curved,
    Step,
    Arrow,
    Circle,
    Dotted,
    Dashed,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    #[serde(default)]
    pub connection_type: ConnectionType,
    #[serde(default = "default_edge_color")]
    pub color: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_edge_color() -> String {
    DEFAULT_EDGE_COLOR.to_string()
}

fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

impl Default for EdgeData {
    fn default() -> Self {
        Self {
            connection_type: ConnectionType::default(),
            color: default_edge_color(),
            notes: String::new(),
            thickness: DEFAULT_THICKNESS,
            source_handle: None,
            target_handle: None,
            source_label: None,
            target_label: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type", default = "default_node_type")]
    pub kind: String,
    #[serde(default)]
    pub data: EdgeData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        data: EdgeData,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: default_node_type(),
            data,
            extra: Map::new(),
        }
    }
}

/// Partial update of a node's display data
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    pub label: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl NodePatch {
    pub fn apply(self, data: &mut NodeData) {
        if let Some(label) = self.label {
            data.label = label;
        }
        if let Some(shape) = self.shape {
            data.shape = Some(shape);
        }
        if let Some(color) = self.color {
            data.color = Some(color);
        }
        if let Some(icon) = self.icon {
            data.icon = Some(icon);
        }
        if let Some(tags) = self.tags {
            data.tags = tags;
        }
        if let Some(notes) = self.notes {
            data.notes = notes;
        }
    }
}

/// Partial update of an edge's display data
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EdgePatch {
    pub connection_type: Option<ConnectionType>,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub thickness: Option<f64>,
}

impl EdgePatch {
    pub fn apply(self, data: &mut EdgeData) {
        if let Some(connection_type) = self.connection_type {
            data.connection_type = connection_type;
        }
        if let Some(color) = self.color {
            data.color = color;
        }
        if let Some(notes) = self.notes {
            data.notes = notes;
        }
        if let Some(thickness) = self.thickness {
            data.thickness = thickness;
        }
    }
}

/// Nodes and edges of a concept map
///
/// Node order is insertion order and is significant: layouts use it to break
/// ties.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// A graph holding only the seed node
    pub fn seed() -> Self {
        Self::new(vec![Node::seed()], Vec::new())
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| &node.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| &edge.id == id)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| &edge.id == id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|node| &node.id == id)?;
        self.edges.retain(|edge| &edge.source != id && &edge.target != id);
        Some(self.nodes.remove(index))
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| &edge.id == id)?;
        Some(self.edges.remove(index))
    }

    pub fn positions(&self) -> HashMap<NodeId, Position> {
        positions_of(&self.nodes)
    }
}

pub fn positions_of(nodes: &[Node]) -> HashMap<NodeId, Position> {
    nodes
        .iter()
        .map(|node| (node.id.clone(), node.position))
        .collect()
}

/// Index based layout graph: node `i` is `nodes[i]`
///
/// Edges whose endpoints are not in `nodes` are left out.
pub fn layout_graph(nodes: &[Node], edges: &[Edge]) -> LayoutGraph<usize> {
    let index: HashMap<&NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    let pairs = edges.iter().filter_map(|edge| {
        Some((*index.get(&edge.source)?, *index.get(&edge.target)?))
    });

    build_graph(0..nodes.len(), pairs)
}
