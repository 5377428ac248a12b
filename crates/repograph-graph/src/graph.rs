use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EdgeSet, Error, FileNode, FunctionNode, GraphEdge, Result};

/// Node identity used by [`Graph`] to key and sort its nodes.
pub trait GraphNode {
    fn node_id(&self) -> &str;
}

impl GraphNode for FileNode {
    fn node_id(&self) -> &str {
        &self.id
    }
}

impl GraphNode for FunctionNode {
    fn node_id(&self) -> &str {
        &self.id
    }
}

/// A layout-agnostic node/edge graph.
///
/// Nodes are sorted by id and edges by edge id, so two graphs built from the
/// same facts serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<GraphEdge>,
}

pub type FileGraph = Graph<FileNode>;
pub type FunctionGraph = Graph<FunctionNode>;

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N: GraphNode> Graph<N> {
    /// Build a graph from nodes and edges. Duplicate node ids keep the first node.
    pub fn from_parts(nodes: impl IntoIterator<Item = N>, edges: EdgeSet) -> Self {
        let mut by_id: BTreeMap<String, N> = BTreeMap::new();
        for node in nodes {
            by_id.entry(node.node_id().to_string()).or_insert(node);
        }
        Self {
            nodes: by_id.into_values().collect(),
            edges: edges.into_vec(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.iter().find(|n| n.node_id() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Reopen the edges for further upserts.
    pub fn edge_set(&self) -> EdgeSet {
        self.edges.iter().cloned().collect()
    }

    /// Replace the edges with the contents of `edges`.
    pub fn set_edges(&mut self, edges: EdgeSet) {
        self.edges = edges.into_vec();
    }

    /// Check that every edge endpoint is a node of this graph.
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) {
                    return Err(Error::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgeKind;

    fn sample() -> FileGraph {
        let nodes = vec![
            FileNode::file("src/b.ts", "typescript"),
            FileNode::file("src/a.ts", "typescript"),
            FileNode::file("src/a.ts", "typescript"),
        ];
        let edges: EdgeSet = vec![GraphEdge::fixed("src/a.ts", "src/b.ts", EdgeKind::Imports)]
            .into_iter()
            .collect();
        Graph::from_parts(nodes, edges)
    }

    #[test]
    fn nodes_are_sorted_and_deduplicated() {
        let graph = sample();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["src/a.ts", "src/b.ts"]);
    }

    #[test]
    fn lookup_by_endpoints() {
        let graph = sample();
        assert!(graph.edge("src/a.ts", "src/b.ts").is_some());
        assert!(graph.edge("src/b.ts", "src/a.ts").is_none());
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn dangling_edges_fail_validation() {
        let mut graph = sample();
        let mut edges = graph.edge_set();
        edges.upsert(GraphEdge::fixed("src/a.ts", "src/missing.ts", EdgeKind::Imports));
        graph.set_edges(edges);

        let err = graph.validate().unwrap_err();
        assert!(matches!(err, Error::DanglingEdge { ref node, .. } if node == "src/missing.ts"));
    }

    #[test]
    fn validation_error_names_edge_and_node() {
        let mut graph = sample();
        let mut edges = graph.edge_set();
        edges.upsert(GraphEdge::fixed("src/gone.ts", "src/a.ts", EdgeKind::Imports));
        graph.set_edges(edges);

        match graph.validate().unwrap_err() {
            Error::DanglingEdge { edge, node } => {
                assert_eq!(node, "src/gone.ts");
                assert!(edge.contains("src/gone.ts"));
            }
        }
    }
}
