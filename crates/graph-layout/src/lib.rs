//! Generic graph layout algorithms
//!
//! This crate provides the automatic arrangements of the concept map editor
//! as pure functions: they read a [`LayoutGraph`] and the current node
//! positions, and return new positions without touching their input.
//!
//! # Layout Engines
//!
//! - [`TreeLayout`]: hierarchical levels following edge direction
//! - [`RadialLayout`]: concentric rings around the most connected node
//! - [`NetworkLayout`]: fixed-step force-directed relaxation
//! - [`HistogramLayout`]: grid ranked by node degree
//! - [`FreeFlowLayout`]: index based spiral, ignores edges
//!
//! Node order in the graph is insertion order, and every tie (root choice,
//! ranking, sibling order) is resolved with it.
//!
//! # Example
//!
//! ```
//! use graph_layout::{build_graph, LayoutEngine, Point, TreeLayout};
//! use std::collections::HashMap;
//!
//! // Node ids and (source, target) pairs
//! let graph = build_graph([1, 2, 3], [(1, 2), (1, 3)]);
//!
//! // Current positions, only used by the force-directed layout
//! let current: HashMap<i32, Point> = HashMap::new();
//!
//! let positions = TreeLayout::default().layout(&graph, &current);
//! assert_eq!(positions[&1], Point::new(400.0, 100.0));
//! assert_eq!(positions[&2], Point::new(275.0, 250.0));
//! ```

mod engine;
mod free_flow;
mod geometry;
mod graph;
mod histogram;
mod network;
mod positions;
mod radial;
mod tree;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Bounds, Point, Vec2};
pub use graph::{build_graph, incident_edges, total_degree, undirected_neighbors, LayoutGraph};
pub use positions::NodePositions;

// Re-export petgraph types needed to name layout graphs
pub use petgraph::graphmap::NodeTrait;
pub use petgraph::Direction;

// Re-export layout types
pub use free_flow::FreeFlowLayout;
pub use histogram::HistogramLayout;
pub use network::NetworkLayout;
pub use radial::RadialLayout;
pub use tree::TreeLayout;
