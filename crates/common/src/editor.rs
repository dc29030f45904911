use crate::error::EditorError;
use crate::history::{EditKey, History, HistorySnapshot, DEFAULT_DEBOUNCE};
use crate::layout::{LayoutOrchestrator, LayoutSource, Layouts};
use crate::model::{
    Edge, EdgeData, EdgeId, EdgePatch, Graph, Node, NodeData, NodeId, NodePatch, Position,
    DEFAULT_NODE_COLOR, DEFAULT_SOURCE_HANDLE, DEFAULT_TARGET_HANDLE,
};
use crate::ser::{export_file_name, from_json, nodes_to_csv, to_json};
use crate::{LayoutMode, Settings};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_TITLE: &str = "Concept Map";

#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Quiet period before a burst of data edits becomes a history entry
    pub debounce: Duration,
    pub layouts: Layouts,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            layouts: Layouts::default(),
        }
    }
}

/// A request to link two nodes, as produced by dragging between handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn from_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    pub fn to_handle(mut self, handle: impl Into<String>) -> Self {
        self.target_handle = Some(handle.into());
        self
    }
}

/// Side of the source node an edge leaves from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Guess the side from a handle name such as `bottom-source`
    pub fn of_handle(handle: &str) -> Option<Self> {
        [
            ("top", Side::Top),
            ("bottom", Side::Bottom),
            ("left", Side::Left),
            ("right", Side::Right),
        ]
        .into_iter()
        .find(|(name, _)| handle.contains(name))
        .map(|(_, side)| side)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        };
        f.write_str(name)
    }
}

/// User facing summary of a new connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionMessage {
    pub side: Option<Side>,
    /// Source label with markup characters removed
    pub source_label: String,
}

impl fmt::Display for ConnectionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(
                f,
                "Connection created from {side} of {}",
                self.source_label
            ),
            None => write!(f, "Connection created of {}", self.source_label),
        }
    }
}

fn strip_markup(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect()
}

fn label_or<'a>(node: &'a Node, fallback: &'a str) -> &'a str {
    match node.data.label.as_str() {
        "" => fallback,
        label => label,
    }
}

/// An editing session over one concept map
///
/// Every structural change commits a history entry right away. Data edits
/// ([`Editor::update_node`], [`Editor::update_edge`]) apply immediately but
/// only reach the history once [`Editor::poll`] sees their quiet period has
/// elapsed.
#[derive(Debug)]
pub struct Editor {
    graph: Graph,
    view_mode: LayoutMode,
    title: String,
    settings: Settings,
    orchestrator: LayoutOrchestrator,
    history: History,
    next_id: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let graph = Graph::seed();
        let view_mode = LayoutMode::default();
        let history = History::new(
            HistorySnapshot::new(&graph.nodes, &graph.edges, view_mode),
            config.debounce,
        );

        Self {
            graph,
            view_mode,
            title: DEFAULT_TITLE.to_string(),
            settings: Settings::default(),
            orchestrator: LayoutOrchestrator::new(config.layouts),
            history,
            next_id: 1,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.graph.edge(id)
    }

    pub fn view_mode(&self) -> LayoutMode {
        self.view_mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn orchestrator(&self) -> &LayoutOrchestrator {
        &self.orchestrator
    }

    fn commit(&mut self) {
        self.history
            .commit(&self.graph.nodes, &self.graph.edges, self.view_mode);
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{prefix}-{}", self.next_id);
            self.next_id += 1;
            let taken = self.graph.nodes.iter().any(|node| node.id.0 == id)
                || self.graph.edges.iter().any(|edge| edge.id.0 == id);
            if !taken {
                return id;
            }
        }
    }

    /// Add a `New Node` with the given shape at `position`
    pub fn add_node(&mut self, shape: &str, position: Position) -> NodeId {
        let id = NodeId(self.fresh_id("node"));
        let node = Node::new(
            id.clone(),
            position,
            NodeData {
                label: "New Node".to_string(),
                shape: Some(shape.to_string()),
                color: Some(DEFAULT_NODE_COLOR.to_string()),
                icon: Some("Circle".to_string()),
                ..Default::default()
            },
        );

        info!("Adding {shape} node {id}");
        self.graph.nodes.push(node);
        self.commit();
        id
    }

    /// Remove a node and every edge touching it
    pub fn delete_node(&mut self, id: &NodeId) -> Result<Node, EditorError> {
        let node = self
            .graph
            .remove_node(id)
            .ok_or_else(|| EditorError::UnknownNode(id.clone()))?;
        info!("Deleted node {id}");
        self.commit();
        Ok(node)
    }

    pub fn connect(
        &mut self,
        connection: Connection,
    ) -> Result<(EdgeId, ConnectionMessage), EditorError> {
        let source = self
            .graph
            .node(&connection.source)
            .ok_or_else(|| EditorError::UnknownNode(connection.source.clone()))?;
        let target = self
            .graph
            .node(&connection.target)
            .ok_or_else(|| EditorError::UnknownNode(connection.target.clone()))?;

        let source_label = label_or(source, "Unknown").to_string();
        let target_label = label_or(target, "Unknown").to_string();
        let message = ConnectionMessage {
            side: connection.source_handle.as_deref().and_then(Side::of_handle),
            source_label: strip_markup(label_or(source, "node")),
        };

        let data = EdgeData {
            source_handle: Some(
                connection
                    .source_handle
                    .unwrap_or_else(|| DEFAULT_SOURCE_HANDLE.to_string()),
            ),
            target_handle: Some(
                connection
                    .target_handle
                    .unwrap_or_else(|| DEFAULT_TARGET_HANDLE.to_string()),
            ),
            source_label: Some(source_label),
            target_label: Some(target_label),
            ..Default::default()
        };

        let id = EdgeId(self.fresh_id("edge"));
        let edge = Edge::new(id.clone(), connection.source, connection.target, data);
        info!("{message} ({id}: {} -> {})", edge.source, edge.target);
        self.graph.edges.push(edge);
        self.commit();

        Ok((id, message))
    }

    pub fn delete_edge(&mut self, id: &EdgeId) -> Result<Edge, EditorError> {
        let edge = self
            .graph
            .remove_edge(id)
            .ok_or_else(|| EditorError::UnknownEdge(id.clone()))?;
        info!("Deleted edge {id}");
        self.commit();
        Ok(edge)
    }

    /// Merge `patch` into a node's data now, commit once edits calm down
    ///
    /// Returns when the pending commit is due.
    pub fn update_node(
        &mut self,
        id: &NodeId,
        patch: NodePatch,
        now: Instant,
    ) -> Result<Instant, EditorError> {
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| EditorError::UnknownNode(id.clone()))?;
        patch.apply(&mut node.data);
        debug!("Updated node {id}");
        Ok(self.history.schedule(EditKey::Node(id.clone()), now))
    }

    /// Merge `patch` into an edge's data now, commit once edits calm down
    pub fn update_edge(
        &mut self,
        id: &EdgeId,
        patch: EdgePatch,
        now: Instant,
    ) -> Result<Instant, EditorError> {
        let edge = self
            .graph
            .edge_mut(id)
            .ok_or_else(|| EditorError::UnknownEdge(id.clone()))?;
        patch.apply(&mut edge.data);
        debug!("Updated edge {id}");
        Ok(self.history.schedule(EditKey::Edge(id.clone()), now))
    }

    /// Copy a node next to the original, labelled as a copy
    pub fn duplicate_node(&mut self, id: &NodeId) -> Result<NodeId, EditorError> {
        let mut copy = self
            .graph
            .node(id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownNode(id.clone()))?;

        copy.id = NodeId(self.fresh_id("node"));
        copy.position = Position::new(copy.position.x + 100.0, copy.position.y + 50.0);
        copy.data.label.push_str(" (Copy)");

        info!("Duplicated node {id} as {}", copy.id);
        let new_id = copy.id.clone();
        self.graph.nodes.push(copy);
        self.commit();
        Ok(new_id)
    }

    /// Line every node up on the mean x coordinate
    ///
    /// Does nothing, and returns false, with fewer than two nodes.
    pub fn align_nodes(&mut self) -> bool {
        let count = self.graph.nodes.len();
        if count < 2 {
            return false;
        }

        let total: f64 = self.graph.nodes.iter().map(|node| node.position.x).sum();
        let mean = total / count as f64;
        for node in &mut self.graph.nodes {
            node.position.x = mean;
        }
        info!("Aligned {count} nodes on x = {mean}");
        self.commit();
        true
    }

    /// Switch to `mode`, returning how the positions were obtained
    pub fn apply_layout(&mut self, mode: LayoutMode) -> LayoutSource {
        let outcome = self.orchestrator.apply(
            &self.graph.nodes,
            &self.graph.edges,
            self.view_mode,
            mode,
        );
        if outcome.source == LayoutSource::Unchanged {
            return outcome.source;
        }

        self.graph.nodes = outcome.nodes;
        self.view_mode = mode;
        self.commit();
        outcome.source
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.graph = Graph::new(snapshot.nodes, snapshot.edges);
        self.view_mode = snapshot.view_mode;
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                info!("Undone");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                info!("Redone");
                true
            }
            None => false,
        }
    }

    /// Back to the seed map, with an empty layout cache and a fresh history
    pub fn reset(&mut self) {
        self.graph = Graph::seed();
        self.view_mode = LayoutMode::default();
        self.title = DEFAULT_TITLE.to_string();
        self.orchestrator.clear_cache();
        self.history.reset(HistorySnapshot::new(
            &self.graph.nodes,
            &self.graph.edges,
            self.view_mode,
        ));
        info!("Workspace reset to default");
    }

    /// Replace the map with a JSON document
    ///
    /// Nothing changes when the document is refused.
    pub fn import_json(&mut self, text: &str) -> Result<(), EditorError> {
        let document = from_json(text).map_err(|e| {
            warn!("Failed to import map: {e}");
            e
        })?;

        info!(
            "Importing {} nodes and {} edges",
            document.nodes.len(),
            document.edges.len()
        );
        self.graph = Graph::new(document.nodes, document.edges);
        if let Some(mode) = document.view_mode {
            self.view_mode = mode;
        }
        if let Some(settings) = document.settings {
            self.settings = settings;
        }
        if let Some(title) = document.title {
            self.title = title;
        }
        self.commit();
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, EditorError> {
        Ok(to_json(
            &self.graph.nodes,
            &self.graph.edges,
            self.view_mode,
            &self.settings,
            &self.title,
        )?)
    }

    pub fn export_csv(&self) -> Result<String, EditorError> {
        Ok(nodes_to_csv(&self.graph.nodes)?)
    }

    /// Name to save an export under, `extension` being `json` or `csv`
    pub fn export_file_name(&self, extension: &str) -> String {
        export_file_name(&self.title, extension)
    }

    /// Commit debounced edits whose quiet period is over
    pub fn poll(&mut self, now: Instant) -> bool {
        self.history
            .poll(now, &self.graph.nodes, &self.graph.edges, self.view_mode)
    }

    /// When [`Editor::poll`] next has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.history.next_deadline()
    }

    /// Drop pending debounced commits, the session is going away
    pub fn shutdown(&mut self) {
        if self.history.has_pending() {
            debug!("Dropping pending history commits");
        }
        self.history.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionType;
    use test_log::test;

    fn editor() -> Editor {
        Editor::default()
    }

    fn seed_id() -> NodeId {
        NodeId::from("1")
    }

    #[test]
    fn starts_from_the_seed_map() {
        let editor = editor();
        assert_eq!(editor.nodes(), &[Node::seed()]);
        assert!(editor.edges().is_empty());
        assert_eq!(editor.view_mode(), LayoutMode::FreeFlow);
        assert_eq!(editor.title(), "Concept Map");
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn add_node_commits() {
        let mut editor = editor();
        let id = editor.add_node("diamond", Position::new(120.0, 340.0));

        assert_eq!(id, NodeId::from("node-1"));
        let node = editor.node(&id).unwrap();
        assert_eq!(node.data.label, "New Node");
        assert_eq!(node.data.shape.as_deref(), Some("diamond"));
        assert_eq!(node.data.icon.as_deref(), Some("Circle"));
        assert_eq!(node.position, Position::new(120.0, 340.0));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn fresh_ids_skip_taken_ones() {
        let mut editor = editor();
        editor
            .import_json(r#"{ "nodes": [{ "id": "node-1" }], "edges": [] }"#)
            .unwrap();

        let id = editor.add_node("circle", Position::default());
        assert_eq!(id, NodeId::from("node-2"));
    }

    #[test]
    fn delete_node_takes_its_edges() {
        let mut editor = editor();
        let other = editor.add_node("circle", Position::default());
        editor.connect(Connection::new("1", other.clone())).unwrap();

        editor.delete_node(&seed_id()).unwrap();
        assert_eq!(editor.nodes().len(), 1);
        assert!(editor.edges().is_empty());
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut editor = editor();
        let before = editor.history().len();

        assert!(matches!(
            editor.delete_node(&"nope".into()),
            Err(EditorError::UnknownNode(_))
        ));
        assert!(matches!(
            editor.delete_edge(&"nope".into()),
            Err(EditorError::UnknownEdge(_))
        ));
        assert!(editor.connect(Connection::new("1", "nope")).is_err());
        assert!(editor.duplicate_node(&"nope".into()).is_err());
        assert!(editor
            .update_node(&"nope".into(), NodePatch::default(), Instant::now())
            .is_err());

        assert_eq!(editor.history().len(), before);
        assert!(editor.next_deadline().is_none());
    }

    #[test]
    fn connect_fills_edge_data_and_message() {
        let mut editor = editor();
        let other = editor.add_node("circle", Position::default());
        editor
            .update_node(
                &seed_id(),
                NodePatch {
                    label: Some(r#"<b>"Ideas" & more</b>"#.to_string()),
                    ..Default::default()
                },
                Instant::now(),
            )
            .unwrap();

        let (id, message) = editor
            .connect(Connection::new("1", other).from_handle("right-source"))
            .unwrap();

        assert_eq!(message.side, Some(Side::Right));
        assert_eq!(
            message.to_string(),
            "Connection created from right of bIdeas  more/b"
        );

        let edge = editor.edge(&id).unwrap();
        assert_eq!(edge.data.connection_type, ConnectionType::Straight);
        assert_eq!(edge.data.source_handle.as_deref(), Some("right-source"));
        assert_eq!(edge.data.target_handle.as_deref(), Some("top"));
        assert_eq!(edge.data.target_label.as_deref(), Some("New Node"));
    }

    #[test]
    fn connect_message_without_known_side() {
        let mut editor = editor();
        let (_, message) = editor
            .connect(Connection::new("1", "1").from_handle("a"))
            .unwrap();
        assert_eq!(message.side, None);
        assert_eq!(message.to_string(), "Connection created of Central Concept");
    }

    #[test]
    fn duplicate_offsets_and_renames() {
        let mut editor = editor();
        let copy = editor.duplicate_node(&seed_id()).unwrap();

        let node = editor.node(&copy).unwrap();
        assert_eq!(node.position, Position::new(350.0, 300.0));
        assert_eq!(node.data.label, "Central Concept (Copy)");
        assert_eq!(node.data.tags, vec!["main".to_string()]);
    }

    #[test]
    fn align_uses_mean_x() {
        let mut editor = editor();
        assert!(!editor.align_nodes());

        editor.add_node("circle", Position::new(50.0, 10.0));
        editor.add_node("circle", Position::new(450.0, 20.0));
        assert!(editor.align_nodes());

        assert!(editor.nodes().iter().all(|node| node.position.x == 250.0));
        assert_eq!(editor.nodes()[2].position.y, 20.0);
    }

    #[test]
    fn layout_switch_round_trip_and_undo() {
        let mut editor = editor();
        editor.add_node("circle", Position::new(10.0, 20.0));
        let free_flow = editor.nodes().to_vec();

        assert_eq!(editor.apply_layout(LayoutMode::Tree), LayoutSource::Computed);
        assert_eq!(editor.view_mode(), LayoutMode::Tree);
        assert_eq!(editor.apply_layout(LayoutMode::Tree), LayoutSource::Unchanged);

        assert_eq!(editor.apply_layout(LayoutMode::FreeFlow), LayoutSource::Restored);
        assert_eq!(editor.nodes(), &free_flow[..]);

        assert!(editor.undo());
        assert_eq!(editor.view_mode(), LayoutMode::Tree);
        assert!(editor.redo());
        assert_eq!(editor.view_mode(), LayoutMode::FreeFlow);
        assert!(!editor.redo());
    }

    #[test]
    fn undo_after_add_then_new_edit_drops_redo() {
        let mut editor = editor();
        editor.add_node("circle", Position::default());
        assert!(editor.undo());
        assert_eq!(editor.nodes().len(), 1);
        assert!(!editor.undo());

        editor.add_node("square", Position::default());
        assert!(!editor.redo());
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn typing_burst_is_one_history_entry() {
        let start = Instant::now();
        let mut editor = editor();

        for (i, label) in ["H", "He", "Hel", "Hell", "Hello"].into_iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            let patch = NodePatch {
                label: Some(label.to_string()),
                ..Default::default()
            };
            editor.update_node(&seed_id(), patch, now).unwrap();
            assert!(!editor.poll(now));
        }
        assert_eq!(editor.node(&seed_id()).unwrap().data.label, "Hello");

        assert!(editor.poll(start + Duration::from_millis(900)));
        assert_eq!(editor.history().len(), 2);
        assert_eq!(
            editor.history().current().unwrap().nodes[0].data.label,
            "Hello"
        );
    }

    #[test]
    fn edge_update_is_debounced_too() {
        let start = Instant::now();
        let mut editor = editor();
        let (id, _) = editor.connect(Connection::new("1", "1")).unwrap();
        let len = editor.history().len();

        let due = editor
            .update_edge(
                &id,
                EdgePatch {
                    thickness: Some(4.0),
                    ..Default::default()
                },
                start,
            )
            .unwrap();
        assert_eq!(due, start + DEFAULT_DEBOUNCE);
        assert_eq!(editor.edge(&id).unwrap().data.thickness, 4.0);

        assert!(editor.poll(due));
        assert_eq!(editor.history().len(), len + 1);
    }

    #[test]
    fn pending_commit_survives_undo() {
        let start = Instant::now();
        let mut editor = editor();
        editor.add_node("circle", Position::default());
        editor.add_node("square", Position::default());
        let patch = NodePatch {
            label: Some("Typed".to_string()),
            ..Default::default()
        };
        editor.update_node(&seed_id(), patch, start).unwrap();

        assert!(editor.undo());
        assert!(editor.history().can_redo());
        assert!(editor.next_deadline().is_some());

        assert!(editor.poll(start + DEFAULT_DEBOUNCE));
        assert_eq!(editor.history().len(), 3);
        assert!(!editor.history().can_redo());

        // The entry holds the state after the undo
        let current = editor.history().current().unwrap();
        assert_eq!(current.nodes.len(), 2);
        assert_eq!(current.nodes[0].data.label, "Central Concept");
    }

    #[test]
    fn pending_commit_survives_layout_switch() {
        let start = Instant::now();
        let mut editor = editor();
        let patch = NodePatch {
            label: Some("Typed".to_string()),
            ..Default::default()
        };
        editor.update_node(&seed_id(), patch, start).unwrap();

        assert_eq!(editor.apply_layout(LayoutMode::Tree), LayoutSource::Computed);
        assert_eq!(editor.history().len(), 2);

        assert!(editor.poll(start + DEFAULT_DEBOUNCE));
        assert_eq!(editor.history().len(), 3);
        let current = editor.history().current().unwrap();
        assert_eq!(current.view_mode, LayoutMode::Tree);
        assert_eq!(current.nodes[0].data.label, "Typed");
        assert_eq!(current.nodes[0].position, Position::new(400.0, 100.0));
    }

    #[test]
    fn shutdown_cancels_pending_commits() {
        let start = Instant::now();
        let mut editor = editor();
        editor
            .update_node(&seed_id(), NodePatch::default(), start)
            .unwrap();

        editor.shutdown();
        assert!(!editor.poll(start + Duration::from_secs(5)));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut editor = editor();
        editor.set_title("Mine");
        editor.add_node("circle", Position::default());
        editor.apply_layout(LayoutMode::Radial);

        editor.reset();
        assert_eq!(editor.nodes(), &[Node::seed()]);
        assert_eq!(editor.view_mode(), LayoutMode::FreeFlow);
        assert_eq!(editor.title(), "Concept Map");
        assert!(editor.orchestrator().cache().is_empty());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn import_applies_optional_keys_and_commits() {
        let mut editor = editor();
        editor
            .import_json(
                r#"{
                    "nodes": [{ "id": "a", "position": { "x": 1, "y": 2 }, "data": { "label": "A" } }],
                    "edges": [],
                    "viewMode": "histogram",
                    "title": "Imported"
                }"#,
            )
            .unwrap();

        assert_eq!(editor.nodes().len(), 1);
        assert_eq!(editor.view_mode(), LayoutMode::Histogram);
        assert_eq!(editor.title(), "Imported");
        assert_eq!(editor.settings(), &Settings::default());
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn refused_import_leaves_state_alone() {
        let mut editor = editor();
        editor.set_title("Keep");

        assert!(matches!(
            editor.import_json(r#"{ "nodes": [] }"#),
            Err(EditorError::Import(_))
        ));
        assert!(editor.import_json("not json").is_err());

        assert_eq!(editor.nodes(), &[Node::seed()]);
        assert_eq!(editor.title(), "Keep");
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn export_then_import_round_trip() {
        let mut editor = editor();
        editor.set_title("Round Trip");
        let other = editor.add_node("hexagon", Position::new(5.0, 6.0));
        editor.connect(Connection::new("1", other)).unwrap();
        editor.apply_layout(LayoutMode::Tree);

        let text = editor.export_json().unwrap();
        let mut copy = Editor::default();
        copy.import_json(&text).unwrap();

        assert_eq!(copy.nodes(), editor.nodes());
        assert_eq!(copy.edges(), editor.edges());
        assert_eq!(copy.view_mode(), LayoutMode::Tree);
        assert_eq!(copy.export_file_name("json"), "round-trip.json");
    }

    #[test]
    fn csv_export_lists_nodes() {
        let editor = editor();
        let csv = editor.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with("\"This is the central concept of your map\""));
    }
}
