use crate::{NodePositions, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G`, allowing different layout
/// engines to work with different graph types. Every engine in this crate is
/// implemented for `&LayoutGraph<N>`.
///
/// Layouts never fail: degenerate input (no nodes, no edges, cycles only)
/// produces a best-effort arrangement. Nodes missing from the returned map
/// were not reached by the algorithm and should keep their current position.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Ord + Hash;

    /// Compute node positions for the given graph, starting from the
    /// current `positions`
    fn layout<P>(&self, graph: G, positions: &P) -> HashMap<Self::NodeId, Point>
    where
        P: NodePositions<Self::NodeId>;
}
