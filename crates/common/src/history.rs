use crate::debounce::Debouncer;
use crate::model::{Edge, EdgeId, Node, NodeId};
use crate::LayoutMode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Saved state of the map, owned copies so later edits can't alter it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub view_mode: LayoutMode,
}

impl HistorySnapshot {
    pub fn new(nodes: &[Node], edges: &[Edge], view_mode: LayoutMode) -> Self {
        Self {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            view_mode,
        }
    }
}

/// What a debounced edit applies to, one pending commit per key
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum EditKey {
    Node(NodeId),
    Edge(EdgeId),
}

/// Linear undo/redo stack with a cursor on the current entry
///
/// Committing while entries exist after the cursor drops them: there is no
/// branching history. Continuous edits (typing a label, dragging a color)
/// go through [`History::schedule`] and are committed once they calm down.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistorySnapshot>,
    cursor: usize,
    debouncer: Debouncer<EditKey>,
}

impl History {
    /// A history holding `initial` as its only entry
    pub fn new(initial: HistorySnapshot, debounce: Duration) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Push a copy of the given state, dropping anything that could be redone
    pub fn commit(&mut self, nodes: &[Node], edges: &[Edge], view_mode: LayoutMode) {
        self.push(HistorySnapshot::new(nodes, edges, view_mode));
    }

    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        debug!(
            "Committed history entry {} of {}",
            self.cursor + 1,
            self.entries.len()
        );
    }

    /// Step back, returning the state to apply
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        debug!("Undo to history entry {}", self.cursor + 1);
        self.entries.get(self.cursor)
    }

    /// Step forward, returning the state to apply
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        debug!("Redo to history entry {}", self.cursor + 1);
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> &[HistorySnapshot] {
        &self.entries
    }

    /// Start over from a single entry, dropping pending debounced commits
    pub fn reset(&mut self, initial: HistorySnapshot) {
        self.debouncer.cancel_all();
        self.entries = vec![initial];
        self.cursor = 0;
    }

    /// Arm (or re-arm) the debounced commit for `key`
    pub fn schedule(&mut self, key: EditKey, now: Instant) -> Instant {
        self.debouncer.schedule(key, now)
    }

    /// Commit the given state if a debounced commit is due
    ///
    /// Several keys falling due together produce a single entry, since they
    /// would all capture the same state.
    pub fn poll(
        &mut self,
        now: Instant,
        nodes: &[Node],
        edges: &[Edge],
        view_mode: LayoutMode,
    ) -> bool {
        let due = self.debouncer.take_due(now);
        if due.is_empty() {
            return false;
        }
        debug!("Debounced commit for {due:?}");
        self.commit(nodes, edges, view_mode);
        true
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.pending() > 0
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Drop every pending debounced commit, on teardown
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel_all();
    }
}
