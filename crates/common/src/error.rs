use crate::model::{EdgeId, NodeId};
use thiserror::Error;

/// Reasons a map document is refused on import
///
/// An import either applies completely or not at all.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid map document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map document has no `{0}`")]
    MissingField(&'static str),

    #[error("node id {0} is used more than once")]
    DuplicateNode(NodeId),

    #[error("edge id {0} is used more than once")]
    DuplicateEdge(EdgeId),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no node with id {0}")]
    UnknownNode(NodeId),

    #[error("no edge with id {0}")]
    UnknownEdge(EdgeId),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
