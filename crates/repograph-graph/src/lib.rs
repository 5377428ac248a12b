//! # repograph-graph
//!
//! Pure data structures for repository structure graphs.
//!
//! This crate provides the node, edge, and per-file record types shared by the
//! analysis pipeline and its consumers, without any parsing or I/O logic.
//!
//! ## Overview
//!
//! A finished analysis produces two layout-agnostic graphs:
//!
//! - **File graph**: directory and file nodes connected by `imports` /
//!   `reexports` edges derived from resolved import specifiers.
//! - **Function graph**: exported functions/classes (and any function that
//!   takes part in a resolved cross-file call) connected by call edges.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │          FileGraph / FunctionGraph (Graph<N>)         │
//! └──────────────┬───────────────────────┬───────────────┘
//!                │                       │
//!                ▼                       ▼
//!        ┌──────────────┐        ┌──────────────┐
//!        │  FileNode /  │        │   EdgeSet    │
//!        │ FunctionNode │        │ (dedup by    │
//!        └──────────────┘        │ source,target)│
//!                                └──────────────┘
//!                ▲
//!                │ materialized from
//!        ┌──────────────────────────────────────┐
//!        │ ImportBinding · FunctionRecord ·      │
//!        │ CallSite   (per-file extraction)      │
//!        └──────────────────────────────────────┘
//! ```
//!
//! ## Edge deduplication
//!
//! Edges are keyed by `"{source}->{target}"`. [`EdgeSet::upsert`] keeps the
//! first writer's `kind` and `provenance`; later writes may only fill in the
//! optional `confidence` / `reason` fields.
//!
//! ```rust
//! use repograph_graph::{EdgeKind, EdgeSet, GraphEdge};
//!
//! let mut edges = EdgeSet::new();
//! edges.upsert(GraphEdge::fixed("src/a.ts", "src/b.ts", EdgeKind::Imports));
//! edges.upsert(GraphEdge::fixed("src/a.ts", "src/b.ts", EdgeKind::Reexports));
//!
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges.get("src/a.ts->src/b.ts").unwrap().kind, EdgeKind::Imports);
//! ```

pub mod edge;
pub mod function;
pub mod graph;
pub mod import;
pub mod node;
pub mod span;
pub mod statistics;

pub use edge::{Confidence, EdgeKind, EdgeSet, GraphEdge, Provenance, Upsert, edge_id};
pub use function::{CallSite, FunctionKind, FunctionRecord, MODULE_RECORD_NAME, record_id};
pub use graph::{FileGraph, FunctionGraph, Graph, GraphNode};
pub use import::{BindingType, ImportBinding, ImportKind, ImportSpecifier};
pub use node::{
    FileNode, FileNodeKind, FunctionNode, ROOT_DIRECTORY, ancestor_directories, basename,
};
pub use span::SourceSpan;
pub use statistics::GraphStats;

/// Error types for graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edge referenced a node id that is not part of the graph.
    #[error("edge {edge} references unknown node {node}")]
    DanglingEdge { edge: String, node: String },
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
