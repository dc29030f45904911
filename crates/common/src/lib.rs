//! Editing core of the concept map editor
//!
//! An [`Editor`] owns the map being edited. It switches between the
//! automatic layouts of the `graph-layout` crate while remembering the
//! positions of each one, and keeps an undo/redo history where bursts of
//! small edits are debounced into a single entry.

pub mod cache;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod history;
pub mod layout;
pub mod mode;
pub mod model;
pub mod ser;
pub mod settings;

pub use cache::{LayoutCache, LayoutSnapshot};
pub use debounce::Debouncer;
pub use editor::{Connection, ConnectionMessage, Editor, EditorConfig, Side};
pub use error::{EditorError, ExportError, ImportError};
pub use history::{EditKey, History, HistorySnapshot, DEFAULT_DEBOUNCE};
pub use layout::{LayoutOrchestrator, LayoutOutcome, LayoutSource, Layouts};
pub use mode::{LayoutMode, UnknownLayoutMode};
pub use model::*;
pub use settings::Settings;
