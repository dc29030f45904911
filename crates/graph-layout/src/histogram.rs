use crate::graph::total_degree;
use crate::{LayoutEngine, LayoutGraph, NodePositions, Point, Vec2};
use petgraph::graphmap::NodeTrait;
use std::collections::HashMap;

/// Configuration for the histogram layout
///
/// Nodes are ranked by total degree (most connected first, ties keep graph
/// order) and laid out row by row on a fixed grid.
#[derive(Debug, Clone)]
pub struct HistogramLayout {
    /// Number of cells per row
    pub columns: usize,

    /// Width and height of a grid cell
    pub cell: Vec2,

    /// Position of the first cell
    pub origin: Point,
}

impl Default for HistogramLayout {
    fn default() -> Self {
        Self {
            columns: 5,
            cell: Vec2::new(150.0, 120.0),
            origin: Point::new(100.0, 100.0),
        }
    }
}

impl HistogramLayout {
    /// Nodes sorted by decreasing total degree
    pub fn rank<N: NodeTrait>(graph: &LayoutGraph<N>) -> Vec<N> {
        let mut ranked: Vec<(N, usize)> = graph
            .nodes()
            .map(|node| (node, total_degree(graph, node)))
            .collect();
        // sort_by is stable, equal degrees keep graph order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(node, _)| node).collect()
    }

    /// Grid cell of the node at the given rank
    pub fn cell_position(&self, rank: usize) -> Point {
        let columns = self.columns.max(1);
        let column = rank % columns;
        let row = rank / columns;
        self.origin + Vec2::new(column as f64 * self.cell.x, row as f64 * self.cell.y)
    }
}

impl<'a, N: NodeTrait> LayoutEngine<&'a LayoutGraph<N>> for HistogramLayout {
    type NodeId = N;

    fn layout<P>(&self, graph: &'a LayoutGraph<N>, _positions: &P) -> HashMap<N, Point>
    where
        P: NodePositions<N>,
    {
        Self::rank(graph)
            .into_iter()
            .enumerate()
            .map(|(rank, node)| (node, self.cell_position(rank)))
            .collect()
    }
}
