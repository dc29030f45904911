use crate::graph::incident_edges;
use crate::{Bounds, LayoutEngine, LayoutGraph, NodePositions, Point, Vec2};
use petgraph::graphmap::NodeTrait;
use std::collections::HashMap;

/// Configuration for the force-directed network layout
///
/// Runs a fixed number of relaxation steps starting from the current
/// positions. There is no convergence check and no random jitter, so the
/// result only depends on the input positions and the graph.
#[derive(Debug, Clone)]
pub struct NetworkLayout {
    /// Number of relaxation steps
    pub iterations: usize,

    /// Numerator of the `repulsion / distance²` force between every pair
    pub repulsion: f64,

    /// Spring factor applied to the vector towards each neighbor
    pub attraction: f64,

    /// Scale applied to the accumulated force before moving a node
    pub step: f64,

    /// Nodes are clamped inside this area after every move
    pub bounds: Bounds,
}

impl Default for NetworkLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            repulsion: 5000.0,
            attraction: 0.01,
            step: 0.01,
            bounds: Bounds::new(Point::new(50.0, 50.0), Point::new(750.0, 550.0)),
        }
    }
}

impl NetworkLayout {
    /// Run the simulation on an explicit starting arrangement
    ///
    /// Nodes are moved one after the other in graph order, and each move
    /// sees the positions already updated during the same iteration.
    pub fn relax<N: NodeTrait>(
        &self,
        graph: &LayoutGraph<N>,
        start: &HashMap<N, Point>,
    ) -> HashMap<N, Point> {
        let nodes: Vec<N> = graph.nodes().collect();
        let index: HashMap<N, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let mut positions: Vec<Point> = nodes
            .iter()
            .map(|node| start.get(node).copied().unwrap_or_default())
            .collect();

        // Other end of every incident edge, in edge order
        let springs: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&node| {
                incident_edges(graph, node)
                    .into_iter()
                    .map(|(_, other)| index[&other])
                    .collect()
            })
            .collect();

        for _ in 0..self.iterations {
            for current in 0..positions.len() {
                let position = positions[current];
                let mut force = Vec2::zero();

                for (other, &other_position) in positions.iter().enumerate() {
                    if other == current {
                        continue;
                    }
                    force += self.repulsion_between(position, other_position);
                }

                for &other in &springs[current] {
                    force += (positions[other] - position) * self.attraction;
                }

                positions[current] = (position + force * self.step).clamp(&self.bounds);
            }
        }

        nodes.into_iter().zip(positions).collect()
    }

    /// Force pushing `position` away from `other`
    fn repulsion_between(&self, position: Point, other: Point) -> Vec2 {
        let delta = position - other;
        let distance = delta.length().max(1.0);
        let magnitude = self.repulsion / (distance * distance);
        delta / distance * magnitude
    }
}

impl<'a, N: NodeTrait> LayoutEngine<&'a LayoutGraph<N>> for NetworkLayout {
    type NodeId = N;

    fn layout<P>(&self, graph: &'a LayoutGraph<N>, positions: &P) -> HashMap<N, Point>
    where
        P: NodePositions<N>,
    {
        let start = graph
            .nodes()
            .filter_map(|node| Some((node, positions.position(node)?)))
            .collect();
        self.relax(graph, &start)
    }
}
