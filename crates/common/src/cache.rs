use crate::model::{Node, NodeId, Position};
use crate::LayoutMode;
use std::collections::HashMap;
use tracing::debug;

/// Node positions saved for one layout mode
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub mode: LayoutMode,
    pub nodes: Vec<Node>,
}

impl LayoutSnapshot {
    pub fn capture(mode: LayoutMode, nodes: &[Node]) -> Self {
        Self {
            mode,
            nodes: nodes.to_vec(),
        }
    }

    /// Copy the saved positions onto `nodes`
    ///
    /// Saved nodes that no longer exist are ignored, and nodes that were not
    /// saved keep their current position. Only positions are restored.
    pub fn restore_onto(&self, nodes: &[Node]) -> Vec<Node> {
        let saved: HashMap<&NodeId, Position> = self
            .nodes
            .iter()
            .map(|node| (&node.id, node.position))
            .collect();

        nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                if let Some(&position) = saved.get(&node.id) {
                    node.position = position;
                }
                node
            })
            .collect()
    }
}

/// Last known positions for every layout mode visited during the session
///
/// Entries are never evicted, only replaced or cleared all at once.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    entries: HashMap<LayoutMode, LayoutSnapshot>,
}

impl LayoutCache {
    pub fn get(&self, mode: LayoutMode) -> Option<&LayoutSnapshot> {
        self.entries.get(&mode)
    }

    pub fn contains(&self, mode: LayoutMode) -> bool {
        self.entries.contains_key(&mode)
    }

    /// Save a snapshot, replacing any previous one for the same mode
    pub fn store(&mut self, snapshot: LayoutSnapshot) {
        debug!(
            "Caching {} positions for {} layout",
            snapshot.nodes.len(),
            snapshot.mode
        );
        self.entries.insert(snapshot.mode, snapshot);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
