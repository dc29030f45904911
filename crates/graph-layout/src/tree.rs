use crate::{LayoutEngine, LayoutGraph, NodePositions, Point};
use petgraph::graphmap::NodeTrait;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Configuration for the hierarchical tree layout
///
/// Levels are built breadth-first from a single root following outgoing
/// edges, and each level is laid out on a horizontal line centered under
/// the root.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    /// Position of the root node
    pub anchor: Point,

    /// Horizontal distance between two nodes of the same level
    pub horizontal_spacing: f64,

    /// Vertical distance between two levels
    pub vertical_spacing: f64,

    /// Deepest level that gets assigned, nodes further down keep their position
    pub max_depth: usize,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            anchor: Point::new(400.0, 100.0),
            horizontal_spacing: 250.0,
            vertical_spacing: 150.0,
            max_depth: 10,
        }
    }
}

impl TreeLayout {
    /// First node without incoming edges, or the first node if every node
    /// has one
    pub fn find_root<N: NodeTrait>(graph: &LayoutGraph<N>) -> Option<N> {
        graph
            .nodes()
            .find(|&node| {
                graph
                    .neighbors_directed(node, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .or_else(|| graph.nodes().next())
    }

    /// Group nodes by their breadth-first distance from the root
    ///
    /// A node is assigned to the first level that reaches it, so cycles
    /// cannot cause infinite descent.
    pub fn compute_levels<N: NodeTrait>(&self, graph: &LayoutGraph<N>) -> Vec<Vec<N>> {
        let Some(root) = Self::find_root(graph) else {
            return Vec::new();
        };

        let mut levels = vec![vec![root]];
        let mut visited = HashSet::from([root]);

        while visited.len() < graph.node_count() && levels.len() <= self.max_depth {
            let mut next_level = Vec::new();
            for &parent in levels.last().into_iter().flatten() {
                for child in graph.neighbors_directed(parent, Direction::Outgoing) {
                    if visited.insert(child) {
                        next_level.push(child);
                    }
                }
            }

            // Nothing reachable is left, the remaining nodes are disconnected
            if next_level.is_empty() {
                break;
            }
            levels.push(next_level);
        }

        levels
    }

    /// Assign coordinates to an already computed level structure
    pub fn compute_positions<N: NodeTrait>(&self, levels: &[Vec<N>]) -> HashMap<N, Point> {
        let mut positions = HashMap::new();

        for (depth, level) in levels.iter().enumerate() {
            let span = self.horizontal_spacing * level.len().saturating_sub(1) as f64;
            let start_x = self.anchor.x - span / 2.0;
            let y = self.anchor.y + depth as f64 * self.vertical_spacing;

            for (index, &node) in level.iter().enumerate() {
                positions.insert(
                    node,
                    Point::new(start_x + index as f64 * self.horizontal_spacing, y),
                );
            }
        }

        positions
    }
}

impl<'a, N: NodeTrait> LayoutEngine<&'a LayoutGraph<N>> for TreeLayout {
    type NodeId = N;

    fn layout<P>(&self, graph: &'a LayoutGraph<N>, _positions: &P) -> HashMap<N, Point>
    where
        P: NodePositions<N>,
    {
        let levels = self.compute_levels(graph);
        self.compute_positions(&levels)
    }
}
