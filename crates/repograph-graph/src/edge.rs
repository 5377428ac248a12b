//! Graph edges and the deduplicating edge store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Imports,
    Reexports,
    Invokes,
    LlmReference,
}

impl EdgeKind {
    /// Map a free-text relationship label onto an edge kind.
    ///
    /// `"call"`/`"invoke"` substrings map to [`EdgeKind::Invokes`], the exact
    /// label `"imports"` to [`EdgeKind::Imports`], anything else to
    /// [`EdgeKind::LlmReference`].
    pub fn from_relationship(label: &str) -> Self {
        let lowered = label.trim().to_ascii_lowercase();
        if lowered.contains("call") || lowered.contains("invoke") {
            EdgeKind::Invokes
        } else if lowered == "imports" {
            EdgeKind::Imports
        } else {
            EdgeKind::LlmReference
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Static,
    Llm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Lenient parse of an LLM-provided confidence label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" | "med" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

/// Edge key shared by file- and function-level edges.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}->{target}")
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GraphEdge {
    /// A deterministic edge derived from resolved source facts.
    pub fn fixed(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            kind,
            provenance: Provenance::Static,
            confidence: None,
            reason: None,
        }
    }

    /// An edge proposed by the language model.
    pub fn suggested(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        confidence: Option<Confidence>,
        reason: Option<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            kind,
            provenance: Provenance::Llm,
            confidence,
            reason,
        }
    }

    pub fn is_static(&self) -> bool {
        self.provenance == Provenance::Static
    }
}

/// Outcome of [`EdgeSet::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// Key existed; at least one missing optional field was filled.
    Backfilled,
    Unchanged,
}

/// Edge store keyed by `(source, target)`.
///
/// Iteration is ordered by edge id so serialized graphs never depend on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeMap<String, GraphEdge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `edge`, or merge it into the existing edge with the same key.
    ///
    /// The first writer owns `kind` and `provenance`. A later write can only
    /// fill a `confidence` or `reason` that is still missing.
    pub fn upsert(&mut self, edge: GraphEdge) -> Upsert {
        match self.edges.get_mut(&edge.id) {
            None => {
                self.edges.insert(edge.id.clone(), edge);
                Upsert::Inserted
            }
            Some(existing) => {
                let mut changed = false;
                if existing.confidence.is_none() && edge.confidence.is_some() {
                    existing.confidence = edge.confidence;
                    changed = true;
                }
                if existing.reason.is_none() && edge.reason.is_some() {
                    existing.reason = edge.reason;
                    changed = true;
                }
                if changed {
                    Upsert::Backfilled
                } else {
                    Upsert::Unchanged
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.edges.contains_key(&edge_id(source, target))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    pub fn into_vec(self) -> Vec<GraphEdge> {
        self.edges.into_values().collect()
    }
}

impl FromIterator<GraphEdge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = GraphEdge>>(iter: I) -> Self {
        let mut set = EdgeSet::new();
        for edge in iter {
            set.upsert(edge);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_keyword_mapping() {
        assert_eq!(EdgeKind::from_relationship("calls"), EdgeKind::Invokes);
        assert_eq!(EdgeKind::from_relationship("Invokes handler"), EdgeKind::Invokes);
        assert_eq!(EdgeKind::from_relationship("imports"), EdgeKind::Imports);
        assert_eq!(EdgeKind::from_relationship("imports types from"), EdgeKind::LlmReference);
        assert_eq!(EdgeKind::from_relationship("configures"), EdgeKind::LlmReference);
    }

    #[test]
    fn second_write_keeps_kind_and_provenance() {
        let mut edges = EdgeSet::new();
        assert_eq!(
            edges.upsert(GraphEdge::fixed("a", "b", EdgeKind::Imports)),
            Upsert::Inserted
        );
        let outcome = edges.upsert(GraphEdge::suggested(
            "a",
            "b",
            EdgeKind::Invokes,
            Some(Confidence::High),
            Some("calls b".to_string()),
        ));

        assert_eq!(outcome, Upsert::Backfilled);
        let edge = edges.get("a->b").unwrap();
        assert_eq!(edge.kind, EdgeKind::Imports);
        assert_eq!(edge.provenance, Provenance::Static);
        assert_eq!(edge.confidence, Some(Confidence::High));
        assert_eq!(edge.reason.as_deref(), Some("calls b"));
    }

    #[test]
    fn backfill_never_overwrites_present_fields() {
        let mut edges = EdgeSet::new();
        edges.upsert(GraphEdge::suggested("a", "b", EdgeKind::LlmReference, Some(Confidence::Low), None));
        edges.upsert(GraphEdge::suggested("a", "b", EdgeKind::LlmReference, Some(Confidence::High), None));
        assert_eq!(edges.get("a->b").unwrap().confidence, Some(Confidence::Low));
    }

    #[test]
    fn iteration_is_sorted_by_id() {
        let edges: EdgeSet = vec![
            GraphEdge::fixed("z", "a", EdgeKind::Imports),
            GraphEdge::fixed("a", "z", EdgeKind::Imports),
        ]
        .into_iter()
        .collect();
        let ids: Vec<_> = edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a->z", "z->a"]);
    }

    #[test]
    fn confidence_parse_is_lenient() {
        assert_eq!(Confidence::parse(" HIGH "), Some(Confidence::High));
        assert_eq!(Confidence::parse("unsure"), None);
    }
}
