//! Non-destructive merge of suggested edges into a deterministic graph.

use repograph_graph::{Confidence, EdgeKind, Graph, GraphEdge, GraphNode, Upsert};
use tracing::trace;

use super::parse::SuggestedEdge;

/// Merge `suggestions` into `graph`, returning the number of new edges.
///
/// A suggestion is dropped unless both endpoints are already nodes of the
/// graph. An existing `(source, target)` edge keeps its kind and provenance
/// and only gains a missing confidence or reason.
pub fn merge_edges<N: GraphNode>(graph: &mut Graph<N>, suggestions: &[SuggestedEdge]) -> usize {
    if suggestions.is_empty() {
        return 0;
    }

    let mut edges = graph.edge_set();
    let mut inserted = 0;

    for suggestion in suggestions {
        let source = suggestion.source.trim();
        let target = suggestion.target.trim();
        if source == target || !graph.contains_node(source) || !graph.contains_node(target) {
            trace!(source, target, "dropping suggestion with unknown endpoint");
            continue;
        }

        let edge = GraphEdge::suggested(
            source,
            target,
            EdgeKind::from_relationship(&suggestion.relationship),
            suggestion.confidence.as_deref().and_then(Confidence::parse),
            suggestion
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from),
        );
        if edges.upsert(edge) == Upsert::Inserted {
            inserted += 1;
        }
    }

    graph.set_edges(edges);
    inserted
}
