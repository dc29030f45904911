use anyhow::{bail, Context, Result};
use conceptmap_common::{
    Connection, EdgeId, EdgePatch, Editor, LayoutMode, LayoutSource, NodeId, NodePatch, Position,
};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A recorded editing session: actions stamped with the milliseconds
/// elapsed since the session started
#[derive(Debug, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub at: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    AddNode {
        shape: String,
        x: f64,
        y: f64,
    },
    DeleteNode {
        id: NodeId,
    },
    Connect {
        source: NodeId,
        target: NodeId,
        #[serde(default, rename = "sourceHandle")]
        source_handle: Option<String>,
        #[serde(default, rename = "targetHandle")]
        target_handle: Option<String>,
    },
    DeleteEdge {
        id: EdgeId,
    },
    UpdateNode {
        id: NodeId,
        patch: NodePatch,
    },
    UpdateEdge {
        id: EdgeId,
        patch: EdgePatch,
    },
    Duplicate {
        id: NodeId,
    },
    Align,
    Layout {
        mode: LayoutMode,
    },
    Undo,
    Redo,
    Reset,
    SetTitle {
        title: String,
    },
}

#[derive(Debug, Default)]
pub struct Replay {
    /// Messages shown to the user along the way
    pub messages: Vec<String>,
    /// Debounced history entries committed by the clock
    pub debounced_commits: usize,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(text).context("Invalid replay script")?;
        if let Some(pair) = script.steps.windows(2).find(|pair| pair[1].at < pair[0].at) {
            bail!(
                "Replay steps must be in time order, {}ms comes after {}ms",
                pair[1].at,
                pair[0].at
            );
        }
        Ok(script)
    }

    /// Play every step against `editor` on a clock starting at `start`
    ///
    /// Debounced commits fire between steps as their deadline passes, and
    /// whatever is still pending at the end is flushed.
    pub fn replay(&self, editor: &mut Editor, start: Instant) -> Result<Replay> {
        let mut replay = Replay::default();

        for (index, step) in self.steps.iter().enumerate() {
            let now = start + Duration::from_millis(step.at);
            replay.flush_until(editor, now);

            debug!("Step {index} at {}ms: {:?}", step.at, step.action);
            if let Some(message) = apply(editor, &step.action, now)
                .with_context(|| format!("Step {index} at {}ms failed", step.at))?
            {
                replay.messages.push(message);
            }
        }

        if let Some(deadline) = editor.next_deadline() {
            replay.flush_until(editor, deadline);
        }

        info!(
            "Replayed {} steps, {} debounced commits",
            self.steps.len(),
            replay.debounced_commits
        );
        Ok(replay)
    }
}

impl Replay {
    fn flush_until(&mut self, editor: &mut Editor, now: Instant) {
        while let Some(deadline) = editor.next_deadline().filter(|&d| d <= now) {
            if editor.poll(deadline) {
                self.debounced_commits += 1;
            }
        }
    }
}

fn apply(editor: &mut Editor, action: &Action, now: Instant) -> Result<Option<String>> {
    let message = match action {
        Action::AddNode { shape, x, y } => {
            editor.add_node(shape, Position::new(*x, *y));
            "Node added".to_string()
        }
        Action::DeleteNode { id } => {
            editor.delete_node(id)?;
            "Node deleted".to_string()
        }
        Action::Connect {
            source,
            target,
            source_handle,
            target_handle,
        } => {
            let connection = Connection {
                source: source.clone(),
                target: target.clone(),
                source_handle: source_handle.clone(),
                target_handle: target_handle.clone(),
            };
            let (_, message) = editor.connect(connection)?;
            message.to_string()
        }
        Action::DeleteEdge { id } => {
            editor.delete_edge(id)?;
            "Connection deleted".to_string()
        }
        Action::UpdateNode { id, patch } => {
            editor.update_node(id, patch.clone(), now)?;
            return Ok(None);
        }
        Action::UpdateEdge { id, patch } => {
            editor.update_edge(id, patch.clone(), now)?;
            return Ok(None);
        }
        Action::Duplicate { id } => {
            editor.duplicate_node(id)?;
            "Node duplicated".to_string()
        }
        Action::Align => {
            if !editor.align_nodes() {
                return Ok(None);
            }
            "Nodes aligned".to_string()
        }
        Action::Layout { mode } => match editor.apply_layout(*mode) {
            LayoutSource::Unchanged => return Ok(None),
            LayoutSource::Restored => format!("Switched back to {mode} layout"),
            LayoutSource::Computed => format!("Applied {mode} layout"),
        },
        Action::Undo => {
            if !editor.undo() {
                return Ok(None);
            }
            "Undone".to_string()
        }
        Action::Redo => {
            if !editor.redo() {
                return Ok(None);
            }
            "Redone".to_string()
        }
        Action::Reset => {
            editor.reset();
            "Workspace reset to default".to_string()
        }
        Action::SetTitle { title } => {
            editor.set_title(title.clone());
            return Ok(None);
        }
    };
    Ok(Some(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn play(text: &str) -> (Editor, Replay) {
        let mut editor = Editor::default();
        let replay = Script::parse(text)
            .unwrap()
            .replay(&mut editor, Instant::now())
            .unwrap();
        (editor, replay)
    }

    #[test]
    fn typing_is_committed_once() {
        let (editor, replay) = play(
            r#"{ "steps": [
                { "at": 0, "action": "update-node", "id": "1", "patch": { "label": "H" } },
                { "at": 100, "action": "update-node", "id": "1", "patch": { "label": "He" } },
                { "at": 200, "action": "update-node", "id": "1", "patch": { "label": "Hello" } }
            ] }"#,
        );

        assert_eq!(replay.debounced_commits, 1);
        assert_eq!(editor.history().len(), 2);
        assert_eq!(editor.nodes()[0].data.label, "Hello");
    }

    #[test]
    fn pauses_split_commits() {
        let (editor, replay) = play(
            r#"{ "steps": [
                { "at": 0, "action": "update-node", "id": "1", "patch": { "label": "A" } },
                { "at": 2000, "action": "update-node", "id": "1", "patch": { "label": "B" } }
            ] }"#,
        );

        assert_eq!(replay.debounced_commits, 2);
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn structural_steps_report_messages() {
        let (editor, replay) = play(
            r#"{ "steps": [
                { "at": 0, "action": "add-node", "shape": "square", "x": 100, "y": 100 },
                { "at": 10, "action": "connect", "source": "1", "target": "node-1", "sourceHandle": "bottom-source" },
                { "at": 20, "action": "layout", "mode": "tree" },
                { "at": 30, "action": "layout", "mode": "tree" },
                { "at": 40, "action": "layout", "mode": "free-flow" },
                { "at": 50, "action": "undo" }
            ] }"#,
        );

        assert_eq!(
            replay.messages,
            vec![
                "Node added",
                "Connection created from bottom of Central Concept",
                "Applied tree layout",
                "Switched back to free-flow layout",
                "Undone",
            ]
        );
        assert_eq!(editor.view_mode(), LayoutMode::Tree);
        assert_eq!(editor.edges().len(), 1);
    }

    #[test]
    fn failing_step_is_reported() {
        let script = Script::parse(
            r#"{ "steps": [ { "at": 5, "action": "delete-node", "id": "ghost" } ] }"#,
        )
        .unwrap();

        let error = script
            .replay(&mut Editor::default(), Instant::now())
            .unwrap_err();
        assert!(format!("{error:#}").contains("Step 0 at 5ms failed"));
    }

    #[test]
    fn steps_out_of_order_are_refused() {
        let error = Script::parse(
            r#"{ "steps": [ { "at": 50, "action": "undo" }, { "at": 10, "action": "redo" } ] }"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("time order"));
    }
}
