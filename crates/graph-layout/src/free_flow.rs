use crate::{LayoutEngine, LayoutGraph, NodePositions, Point};
use petgraph::graphmap::NodeTrait;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Configuration for the free-flow layout
///
/// A spiral-like spread that only depends on the index of each node, edges
/// are ignored. Applying it twice to the same node order gives the exact
/// same positions.
#[derive(Debug, Clone)]
pub struct FreeFlowLayout {
    pub center: Point,

    /// Angle between two consecutive nodes, in radians
    pub angle_step: f64,

    pub base_radius: f64,

    /// Radius added per node index, wrapped at `radius_span`
    pub radius_step: f64,

    pub radius_span: f64,
}

impl Default for FreeFlowLayout {
    fn default() -> Self {
        Self {
            center: Point::new(400.0, 300.0),
            angle_step: 2.4,
            base_radius: 100.0,
            radius_step: 20.0,
            radius_span: 200.0,
        }
    }
}

impl FreeFlowLayout {
    /// Position of the node at the given index
    pub fn position(&self, index: usize) -> Point {
        let index = index as f64;
        let angle = (index * self.angle_step) % TAU;
        let radius = self.base_radius + (index * self.radius_step) % self.radius_span;
        self.center.polar_offset(radius, angle)
    }
}

impl<'a, N: NodeTrait> LayoutEngine<&'a LayoutGraph<N>> for FreeFlowLayout {
    type NodeId = N;

    fn layout<P>(&self, graph: &'a LayoutGraph<N>, _positions: &P) -> HashMap<N, Point>
    where
        P: NodePositions<N>,
    {
        graph
            .nodes()
            .enumerate()
            .map(|(index, node)| (node, self.position(index)))
            .collect()
    }
}
