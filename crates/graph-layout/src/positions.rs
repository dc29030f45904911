use crate::Point;
use std::collections::HashMap;
use std::hash::Hash;

/// Trait for providing the current node positions during layout computation
///
/// Layouts that refine an existing arrangement (force-directed) read from it,
/// the purely structural ones ignore it.
pub trait NodePositions<N> {
    /// Get the current position of a node, if it has one
    fn position(&self, node: N) -> Option<Point>;
}

// Blanket implementation for closures
impl<N, F> NodePositions<N> for F
where
    F: Fn(N) -> Option<Point>,
{
    fn position(&self, node: N) -> Option<Point> {
        self(node)
    }
}

// Implementation for HashMap
impl<N: Eq + Hash + Copy> NodePositions<N> for HashMap<N, Point> {
    fn position(&self, node: N) -> Option<Point> {
        self.get(&node).copied()
    }
}
