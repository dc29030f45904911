use crate::error::{ExportError, ImportError};
use crate::model::{Edge, Node};
use crate::{LayoutMode, Settings};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CSV_HEADER: &str = "id,label,shape,color,tags,notes";

/// Everything a map file contains
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub view_mode: Option<LayoutMode>,
    pub settings: Option<Settings>,
    pub title: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedMap<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    view_mode: LayoutMode,
    settings: &'a Settings,
    title: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedMap {
    nodes: Option<Vec<Node>>,
    edges: Option<Vec<Edge>>,
    view_mode: Option<LayoutMode>,
    settings: Option<Settings>,
    title: Option<String>,
}

/// Pretty printed JSON of the whole map
pub fn to_json(
    nodes: &[Node],
    edges: &[Edge],
    view_mode: LayoutMode,
    settings: &Settings,
    title: &str,
) -> Result<String, ExportError> {
    let map = ExportedMap {
        nodes,
        edges,
        view_mode,
        settings,
        title,
    };
    Ok(serde_json::to_string_pretty(&map)?)
}

/// Parse and validate a map file
///
/// `nodes` and `edges` are required, the other keys are optional.
pub fn from_json(text: &str) -> Result<MapDocument, ImportError> {
    let map: ImportedMap = serde_json::from_str(text)?;
    let nodes = map.nodes.ok_or(ImportError::MissingField("nodes"))?;
    let edges = map.edges.ok_or(ImportError::MissingField("edges"))?;

    let mut node_ids = HashSet::new();
    if let Some(node) = nodes.iter().find(|node| !node_ids.insert(&node.id)) {
        return Err(ImportError::DuplicateNode(node.id.clone()));
    }
    let mut edge_ids = HashSet::new();
    if let Some(edge) = edges.iter().find(|edge| !edge_ids.insert(&edge.id)) {
        return Err(ImportError::DuplicateEdge(edge.id.clone()));
    }

    Ok(MapDocument {
        nodes,
        edges,
        view_mode: map.view_mode,
        settings: map.settings,
        title: map.title,
    })
}

/// Node table as CSV, every field quoted
///
/// Tags are joined with `;`. Missing shape and color are written with their
/// default value.
pub fn nodes_to_csv(nodes: &[Node]) -> Result<String, ExportError> {
    let mut buffer = CSV_HEADER.as_bytes().to_vec();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(Vec::new());

    for node in nodes {
        let tags = node.data.tags.join(";");
        writer.write_record([
            node.id.0.as_str(),
            node.data.label.as_str(),
            node.data.shape_or_default(),
            node.data.color_or_default(),
            tags.as_str(),
            node.data.notes.as_str(),
        ])?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    if !rows.is_empty() {
        buffer.push(b'\n');
        buffer.extend_from_slice(rows.strip_suffix(b"\n").unwrap_or(&rows));
    }

    Ok(String::from_utf8(buffer)?)
}

/// File name for an exported map: the title with anything but ASCII
/// letters, digits, `-` and `_` replaced by `-`, lowercased
pub fn export_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("{stem}.{extension}")
}
