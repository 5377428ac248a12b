use serde::{Deserialize, Serialize};

/// Summary counters for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// File nodes in the file graph.
    pub file_count: usize,
    pub directory_count: usize,
    /// Function nodes in the function graph.
    pub function_count: usize,
    pub duration_ms: u64,

    pub file_edge_count: usize,
    pub function_edge_count: usize,
    /// Distinct unresolved specifiers summed over all files.
    pub unresolved_import_count: usize,
    /// Input files with no extractor.
    pub skipped_file_count: usize,
    pub parse_failure_count: usize,
    /// Edges contributed by enrichment (file and function level).
    pub llm_edge_count: usize,
}

impl GraphStats {
    pub fn node_count(&self) -> usize {
        self.file_count + self.directory_count + self.function_count
    }

    pub fn edge_count(&self) -> usize {
        self.file_edge_count + self.function_edge_count
    }
}
