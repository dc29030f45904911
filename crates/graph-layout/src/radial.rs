use crate::graph::{total_degree, undirected_neighbors};
use crate::{LayoutEngine, LayoutGraph, NodePositions, Point};
use petgraph::graphmap::NodeTrait;
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Configuration for the radial layout
///
/// The most connected node sits at the center and the others are placed on
/// concentric rings according to their undirected distance from it.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    /// Position of the root node
    pub center: Point,

    /// Radius increment between two rings
    pub ring_spacing: f64,

    /// Outermost ring that gets assigned
    pub max_rings: usize,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            center: Point::new(400.0, 300.0),
            ring_spacing: 150.0,
            max_rings: 5,
        }
    }
}

impl RadialLayout {
    /// Node with the highest total degree, the first one wins on ties
    pub fn find_root<N: NodeTrait>(graph: &LayoutGraph<N>) -> Option<N> {
        let mut best: Option<(N, usize)> = None;
        for node in graph.nodes() {
            let degree = total_degree(graph, node);
            if best.map_or(true, |(_, best_degree)| degree > best_degree) {
                best = Some((node, degree));
            }
        }
        best.map(|(node, _)| node)
    }

    /// Group nodes by their undirected breadth-first distance from the root
    pub fn compute_rings<N: NodeTrait>(&self, graph: &LayoutGraph<N>) -> Vec<Vec<N>> {
        let Some(root) = Self::find_root(graph) else {
            return Vec::new();
        };

        let mut rings = vec![vec![root]];
        let mut visited = HashSet::from([root]);

        while visited.len() < graph.node_count() && rings.len() <= self.max_rings {
            let mut next_ring = Vec::new();
            for &parent in rings.last().into_iter().flatten() {
                for neighbor in undirected_neighbors(graph, parent) {
                    if visited.insert(neighbor) {
                        next_ring.push(neighbor);
                    }
                }
            }

            if next_ring.is_empty() {
                break;
            }
            rings.push(next_ring);
        }

        rings
    }

    /// Spread every ring evenly around its circle
    pub fn compute_positions<N: NodeTrait>(&self, rings: &[Vec<N>]) -> HashMap<N, Point> {
        let mut positions = HashMap::new();
        let Some((center_ring, outer_rings)) = rings.split_first() else {
            return positions;
        };

        for &root in center_ring {
            positions.insert(root, self.center);
        }

        for (ring_index, ring) in outer_rings.iter().enumerate() {
            let radius = self.ring_spacing * (ring_index + 1) as f64;
            let step = TAU / ring.len() as f64;
            for (index, &node) in ring.iter().enumerate() {
                positions.insert(node, self.center.polar_offset(radius, index as f64 * step));
            }
        }

        positions
    }
}

impl<'a, N: NodeTrait> LayoutEngine<&'a LayoutGraph<N>> for RadialLayout {
    type NodeId = N;

    fn layout<P>(&self, graph: &'a LayoutGraph<N>, _positions: &P) -> HashMap<N, Point>
    where
        P: NodePositions<N>,
    {
        let rings = self.compute_rings(graph);
        self.compute_positions(&rings)
    }
}
