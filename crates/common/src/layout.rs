use crate::cache::{LayoutCache, LayoutSnapshot};
use crate::model::{layout_graph, Edge, Node};
use crate::LayoutMode;
use graph_layout::{
    FreeFlowLayout, HistogramLayout, LayoutEngine, NetworkLayout, Point, RadialLayout, TreeLayout,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Configured instance of every layout algorithm
#[derive(Debug, Clone, Default)]
pub struct Layouts {
    pub tree: TreeLayout,
    pub radial: RadialLayout,
    pub network: NetworkLayout,
    pub histogram: HistogramLayout,
    pub free_flow: FreeFlowLayout,
}

impl Layouts {
    /// Recompute positions for `mode` from the current nodes and edges
    ///
    /// Returns a new node list. Nodes the algorithm did not reach keep their
    /// current position.
    pub fn compute(&self, mode: LayoutMode, nodes: &[Node], edges: &[Edge]) -> Vec<Node> {
        let graph = layout_graph(nodes, edges);
        let current = |index: usize| nodes.get(index).map(|node| Point::from(node.position));

        let positions: HashMap<usize, Point> = match mode {
            LayoutMode::Tree => self.tree.layout(&graph, &current),
            LayoutMode::Radial => self.radial.layout(&graph, &current),
            LayoutMode::Network => self.network.layout(&graph, &current),
            LayoutMode::Histogram => self.histogram.layout(&graph, &current),
            LayoutMode::FreeFlow => self.free_flow.layout(&graph, &current),
        };

        debug!(
            "{mode} layout placed {} of {} nodes",
            positions.len(),
            nodes.len()
        );

        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let mut node = node.clone();
                if let Some(&position) = positions.get(&index) {
                    node.position = position.into();
                }
                node
            })
            .collect()
    }
}

/// How the positions of a layout switch were obtained
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LayoutSource {
    /// The target mode was already active, nothing changed
    Unchanged,
    /// Positions came from an earlier visit of the target mode
    Restored,
    /// Positions were computed by the layout algorithm
    Computed,
}

#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub nodes: Vec<Node>,
    pub source: LayoutSource,
}

/// Switches between layout modes, remembering the positions of each mode
///
/// Going back to a mode that was already visited restores the positions it
/// had when it was left, including manual edits, instead of running the
/// algorithm again.
#[derive(Debug, Clone, Default)]
pub struct LayoutOrchestrator {
    layouts: Layouts,
    cache: LayoutCache,
}

impl LayoutOrchestrator {
    pub fn new(layouts: Layouts) -> Self {
        Self {
            layouts,
            cache: LayoutCache::default(),
        }
    }

    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Forget every saved position, used when the workspace is reset
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Arrange `nodes` for `target`, the currently displayed mode being
    /// `current`
    ///
    /// The input is never modified, the new node list is returned.
    pub fn apply(
        &mut self,
        nodes: &[Node],
        edges: &[Edge],
        current: LayoutMode,
        target: LayoutMode,
    ) -> LayoutOutcome {
        if current == target {
            debug!("{target} layout already active");
            return LayoutOutcome {
                nodes: nodes.to_vec(),
                source: LayoutSource::Unchanged,
            };
        }

        // Remember where things are before leaving the current mode
        self.cache.store(LayoutSnapshot::capture(current, nodes));

        if let Some(snapshot) = self.cache.get(target) {
            info!("Switching back to {target} layout");
            return LayoutOutcome {
                nodes: snapshot.restore_onto(nodes),
                source: LayoutSource::Restored,
            };
        }

        info!("Computing {target} layout for {} nodes", nodes.len());
        let nodes = self.layouts.compute(target, nodes, edges);
        self.cache.store(LayoutSnapshot::capture(target, &nodes));

        LayoutOutcome {
            nodes,
            source: LayoutSource::Computed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{positions_of, EdgeData, NodeData, Position};
    use test_log::test;

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node::new(id, Position::new(x, y), NodeData::default())
    }

    fn sample() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            node("a", 120.0, 80.0),
            node("b", 300.0, 410.0),
            node("c", 640.0, 90.0),
            node("d", 77.7, 512.3),
        ];
        let edges = vec![
            Edge::new("ab", "a", "b", EdgeData::default()),
            Edge::new("ac", "a", "c", EdgeData::default()),
            Edge::new("cd", "c", "d", EdgeData::default()),
            Edge::new("dx", "d", "missing", EdgeData::default()),
        ];
        (nodes, edges)
    }

    #[test]
    fn tree_scenario() {
        let nodes = vec![node("A", 0.0, 0.0), node("B", 0.0, 0.0), node("C", 0.0, 0.0)];
        let edges = vec![
            Edge::new("ab", "A", "B", EdgeData::default()),
            Edge::new("ac", "A", "C", EdgeData::default()),
        ];

        let laid_out = Layouts::default().compute(LayoutMode::Tree, &nodes, &edges);
        assert_eq!(laid_out[0].position, Position::new(400.0, 100.0));
        assert_eq!(laid_out[1].position, Position::new(275.0, 250.0));
        assert_eq!(laid_out[2].position, Position::new(525.0, 250.0));
    }

    #[test]
    fn same_mode_is_a_no_op() {
        let (nodes, edges) = sample();
        let mut orchestrator = LayoutOrchestrator::default();

        let outcome = orchestrator.apply(&nodes, &edges, LayoutMode::Tree, LayoutMode::Tree);
        assert_eq!(outcome.source, LayoutSource::Unchanged);
        assert_eq!(outcome.nodes, nodes);
        assert!(orchestrator.cache().is_empty());
    }

    #[test]
    fn round_trip_restores_previous_positions() {
        let (nodes, edges) = sample();

        for from in LayoutMode::ALL {
            for to in LayoutMode::ALL.into_iter().filter(|&to| to != from) {
                let mut orchestrator = LayoutOrchestrator::default();

                let there = orchestrator.apply(&nodes, &edges, from, to);
                assert_eq!(there.source, LayoutSource::Computed);

                let back = orchestrator.apply(&there.nodes, &edges, to, from);
                assert_eq!(back.source, LayoutSource::Restored);
                assert_eq!(positions_of(&back.nodes), positions_of(&nodes), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn manual_edits_survive_a_switch() {
        let (nodes, edges) = sample();
        let mut orchestrator = LayoutOrchestrator::default();

        let mut tree = orchestrator
            .apply(&nodes, &edges, LayoutMode::FreeFlow, LayoutMode::Tree)
            .nodes;
        tree[1].position = Position::new(1.5, 2.5);

        let radial = orchestrator.apply(&tree, &edges, LayoutMode::Tree, LayoutMode::Radial);
        let back = orchestrator.apply(&radial.nodes, &edges, LayoutMode::Radial, LayoutMode::Tree);

        assert_eq!(back.source, LayoutSource::Restored);
        assert_eq!(back.nodes[1].position, Position::new(1.5, 2.5));
    }

    #[test]
    fn nodes_added_after_caching_keep_their_position() {
        let (nodes, edges) = sample();
        let mut orchestrator = LayoutOrchestrator::default();

        let tree = orchestrator.apply(&nodes, &edges, LayoutMode::FreeFlow, LayoutMode::Tree);
        let mut grown = tree.nodes.clone();
        grown.push(node("late", 9.0, 9.0));

        let back = orchestrator.apply(&grown, &edges, LayoutMode::Tree, LayoutMode::FreeFlow);
        assert_eq!(back.nodes.len(), 5);
        assert_eq!(back.nodes[4].position, Position::new(9.0, 9.0));
    }

    #[test]
    fn input_is_left_untouched() {
        let (nodes, edges) = sample();
        let before = nodes.clone();
        let mut orchestrator = LayoutOrchestrator::default();

        orchestrator.apply(&nodes, &edges, LayoutMode::FreeFlow, LayoutMode::Network);
        assert_eq!(nodes, before);
        assert_eq!(orchestrator.cache().len(), 2);
    }

    #[test]
    fn free_flow_is_idempotent() {
        let (nodes, edges) = sample();
        let layouts = Layouts::default();

        let once = layouts.compute(LayoutMode::FreeFlow, &nodes, &edges);
        let twice = layouts.compute(LayoutMode::FreeFlow, &once, &edges);
        assert_eq!(positions_of(&once), positions_of(&twice));
    }

    #[test]
    fn empty_graph_is_fine_for_every_mode() {
        let layouts = Layouts::default();
        for mode in LayoutMode::ALL {
            assert!(layouts.compute(mode, &[], &[]).is_empty());
        }
    }
}
