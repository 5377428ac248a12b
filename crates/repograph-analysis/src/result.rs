use std::fmt;

use serde::{Deserialize, Serialize};

use repograph_graph::{FileGraph, FunctionGraph, GraphStats, Provenance};

use crate::config::FileMap;

/// Immutable output of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_graph: FileGraph,
    pub function_graph: FunctionGraph,
    /// Degraded conditions, in pipeline order.
    pub warnings: Vec<String>,
    pub stats: GraphStats,
    /// Free-text observations returned by enrichment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl AnalysisResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of edges (file and function level) proposed by enrichment.
    pub fn llm_edge_count(&self) -> usize {
        self.file_graph
            .edges
            .iter()
            .chain(&self.function_graph.edges)
            .filter(|e| e.provenance == Provenance::Llm)
            .count()
    }

    /// Stable content hash of an input file map.
    ///
    /// Independent of map order, so it can key a cache of results.
    pub fn fingerprint(files: &FileMap) -> String {
        let mut entries: Vec<(&String, &String)> = files.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut hasher = blake3::Hasher::new();
        for (path, content) in entries {
            hasher.update(&(path.len() as u64).to_le_bytes());
            hasher.update(path.as_bytes());
            hasher.update(&(content.len() as u64).to_le_bytes());
            hasher.update(content.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "Analysis Result")?;
        writeln!(f, "================")?;
        writeln!(
            f,
            "Files: {} ({} directories)",
            stats.file_count, stats.directory_count
        )?;
        writeln!(f, "Functions: {}", stats.function_count)?;
        writeln!(
            f,
            "Edges: {} file, {} function",
            stats.file_edge_count, stats.function_edge_count
        )?;
        if stats.llm_edge_count > 0 {
            writeln!(f, "Suggested edges: {}", stats.llm_edge_count)?;
        }
        if stats.skipped_file_count > 0 {
            writeln!(f, "Skipped (unsupported): {}", stats.skipped_file_count)?;
        }
        writeln!(f, "Duration: {}ms", stats.duration_ms)?;

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings ({}):", self.warnings.len())?;
            for warning in &self.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }
        for note in &self.notes {
            writeln!(f, "Note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_map_order() {
        let mut a = FileMap::new();
        a.insert("a.ts".into(), "1".into());
        a.insert("b.ts".into(), "2".into());
        let mut b = FileMap::new();
        b.insert("b.ts".into(), "2".into());
        b.insert("a.ts".into(), "1".into());

        assert_eq!(AnalysisResult::fingerprint(&a), AnalysisResult::fingerprint(&b));

        b.insert("a.ts".into(), "changed".into());
        assert_ne!(AnalysisResult::fingerprint(&a), AnalysisResult::fingerprint(&b));
    }

    #[test]
    fn fingerprint_separates_path_and_content() {
        let mut a = FileMap::new();
        a.insert("ab".into(), "c".into());
        let mut b = FileMap::new();
        b.insert("a".into(), "bc".into());
        assert_ne!(AnalysisResult::fingerprint(&a), AnalysisResult::fingerprint(&b));
    }
}
