//! Serialization shape checks for graph types.

use crate::{
    Confidence, EdgeKind, EdgeSet, FileGraph, FileNode, FunctionKind, FunctionNode,
    FunctionRecord, Graph, GraphEdge, GraphStats, SourceSpan,
};
use serde_json::json;

#[test]
fn edge_serializes_camel_case_without_empty_optionals() {
    let edge = GraphEdge::fixed("a.ts", "b.ts", EdgeKind::LlmReference);
    let value = serde_json::to_value(&edge).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "a.ts->b.ts",
            "source": "a.ts",
            "target": "b.ts",
            "kind": "llm-reference",
            "provenance": "static"
        })
    );
}

#[test]
fn suggested_edge_carries_confidence() {
    let edge = GraphEdge::suggested(
        "a.ts",
        "b.ts",
        EdgeKind::Invokes,
        Some(Confidence::Medium),
        Some("wires handlers".into()),
    );
    let value = serde_json::to_value(&edge).unwrap();
    assert_eq!(value["provenance"], "llm");
    assert_eq!(value["confidence"], "medium");
    assert_eq!(value["kind"], "invokes");
}

#[test]
fn function_node_from_record() {
    let mut record = FunctionRecord::new("src/util.ts", "helper", "helper", FunctionKind::Function)
        .with_span(SourceSpan::new((1, 0), (3, 1)));
    record.mark_exported("helper");

    let node = FunctionNode::from(&record);
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["id"], "src/util.ts::helper");
    assert_eq!(value["filePath"], "src/util.ts");
    assert_eq!(value["exportedAs"], "helper");
    assert_eq!(value["sourceSpan"]["startLine"], 1);
}

#[test]
fn file_graph_round_trips_through_json() {
    let graph: FileGraph = Graph::from_parts(
        vec![FileNode::directory("."), FileNode::file("a.ts", "typescript")],
        EdgeSet::new(),
    );
    let text = serde_json::to_string(&graph).unwrap();
    let back: FileGraph = serde_json::from_str(&text).unwrap();
    assert_eq!(graph, back);
}

#[test]
fn stats_serialize_extended_counters() {
    let stats = GraphStats {
        file_count: 2,
        directory_count: 1,
        llm_edge_count: 4,
        ..Default::default()
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["fileCount"], 2);
    assert_eq!(value["llmEdgeCount"], 4);
    assert_eq!(stats.node_count(), 3);
}
