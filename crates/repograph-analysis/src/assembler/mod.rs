//! Turns per-file extraction results into the file and function graphs.
//!
//! Runs single-threaded after every worker has finished, in this order:
//! import resolution, export indexing, call-edge derivation, node
//! materialization, warning aggregation.

mod exports;

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use repograph_graph::{
    BindingType, EdgeKind, EdgeSet, FileGraph, FileNode, FunctionGraph, FunctionNode, GraphEdge,
    GraphStats, ImportSpecifier, ROOT_DIRECTORY, ancestor_directories,
};

use self::exports::{ExportIndex, RecordRef};
use crate::resolver::ModuleResolver;
use crate::walker::{ExtractedFile, WalkOutput};

/// Unresolved specifiers listed per file before the list is elided.
const UNRESOLVED_SAMPLE: usize = 5;

pub(crate) const NO_SUPPORTED_FILES: &str = "no supported files were parsed";

/// Output of [`assemble`].
#[derive(Debug, Default)]
pub(crate) struct Assembly {
    pub file_graph: FileGraph,
    pub function_graph: FunctionGraph,
    pub warnings: Vec<String>,
    pub stats: GraphStats,
    /// Extraction results with resolution filled in.
    pub files: Vec<ExtractedFile>,
    pub unresolved: IndexMap<String, IndexSet<String>>,
}

pub(crate) fn assemble(walk: WalkOutput, resolver: &ModuleResolver) -> Assembly {
    let WalkOutput {
        extracted: mut files,
        failed,
        supported,
        skipped,
    } = walk;

    let (file_edges, unresolved) = resolve_imports(&mut files, resolver);

    let index = ExportIndex::build(&files);
    debug!(exports = index.len(), "built export index");

    let function_edges = derive_call_edges(&mut files, &index);

    let mut directories: BTreeSet<String> = BTreeSet::new();
    directories.insert(ROOT_DIRECTORY.to_string());
    for path in &supported {
        directories.extend(ancestor_directories(path));
    }
    let directory_count = directories.len();

    let file_nodes = directories
        .into_iter()
        .map(FileNode::directory)
        .chain(
            files
                .iter()
                .map(|file| FileNode::file(&file.path, file.language.name())),
        );
    let file_graph = FileGraph::from_parts(file_nodes, file_edges);

    let function_nodes = files
        .iter()
        .flat_map(|file| file.extraction.functions.iter())
        .filter(|record| record.include)
        .map(FunctionNode::from);
    let function_graph = FunctionGraph::from_parts(function_nodes, function_edges);

    let mut warnings: Vec<String> = failed.iter().map(|f| f.error.to_string()).collect();
    for (path, specifiers) in &unresolved {
        warnings.push(unresolved_warning(path, specifiers));
    }
    if files.is_empty() {
        warnings.push(NO_SUPPORTED_FILES.to_string());
    }

    let stats = GraphStats {
        file_count: file_graph.nodes.len() - directory_count,
        directory_count,
        function_count: function_graph.nodes.len(),
        file_edge_count: file_graph.edges.len(),
        function_edge_count: function_graph.edges.len(),
        unresolved_import_count: unresolved.values().map(IndexSet::len).sum(),
        skipped_file_count: skipped,
        parse_failure_count: failed.len(),
        ..GraphStats::default()
    };

    Assembly {
        file_graph,
        function_graph,
        warnings,
        stats,
        files,
        unresolved,
    }
}

/// Resolve every binding and collect file edges plus per-file unresolved specifiers.
fn resolve_imports(
    files: &mut [ExtractedFile],
    resolver: &ModuleResolver,
) -> (EdgeSet, IndexMap<String, IndexSet<String>>) {
    let nodes: FxHashSet<String> = files.iter().map(|f| f.path.clone()).collect();
    let mut edges = EdgeSet::new();
    let mut unresolved: IndexMap<String, IndexSet<String>> = IndexMap::new();

    for file in files.iter_mut() {
        for binding in &mut file.extraction.imports {
            if binding.source.trim().is_empty() {
                continue;
            }
            let Some(target) = resolver.resolve(&file.path, &binding.source) else {
                unresolved
                    .entry(file.path.clone())
                    .or_default()
                    .insert(binding.source.clone());
                continue;
            };
            binding.set_resolved(&target);

            // Targets without a file node (assets, parse failures) get no edge.
            if target != file.path && nodes.contains(&target) {
                let kind = if binding.reexport {
                    EdgeKind::Reexports
                } else {
                    EdgeKind::Imports
                };
                edges.upsert(GraphEdge::fixed(&file.path, &target, kind));
            }
        }
    }

    (edges, unresolved)
}

/// Match call sites to exported records of the files their bindings resolved to.
fn derive_call_edges(files: &mut [ExtractedFile], index: &ExportIndex) -> EdgeSet {
    let mut edges = EdgeSet::new();
    let mut included: Vec<RecordRef> = Vec::new();
    let mut resolved_sites: Vec<(usize, usize, String)> = Vec::new();

    for (file_idx, file) in files.iter().enumerate() {
        let mut bindings: FxHashMap<(&str, &str), (&str, &ImportSpecifier)> = FxHashMap::default();
        for binding in &file.extraction.imports {
            let Some(target) = binding.resolved_target.as_deref() else {
                continue;
            };
            for spec in &binding.specifiers {
                bindings
                    .entry((binding.source.as_str(), spec.local_name.as_str()))
                    .or_insert((target, spec));
            }
        }
        if bindings.is_empty() {
            continue;
        }

        let records: FxHashMap<&str, usize> = file
            .extraction
            .functions
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.id.as_str(), idx))
            .collect();

        for (site_idx, site) in file.extraction.calls.iter().enumerate() {
            let Some(source) = site.source_specifier.as_deref() else {
                continue;
            };
            let Some(&(target, spec)) = bindings.get(&(source, site.callee_local_name.as_str()))
            else {
                continue;
            };
            resolved_sites.push((file_idx, site_idx, target.to_string()));

            let found = match (&site.member_name, spec.binding_type) {
                (Some(member), _) => index.lookup(files, target, member),
                (None, BindingType::Namespace) => None,
                (None, _) => {
                    let imported = site
                        .callee_imported_name
                        .as_deref()
                        .unwrap_or(&spec.imported_name);
                    index
                        .lookup(files, target, imported)
                        .or_else(|| index.lookup(files, target, "default"))
                }
            };
            let (Some(target_ref), Some(&caller_idx)) = (found, records.get(site.caller_id.as_str()))
            else {
                continue;
            };

            let target_id = &files[target_ref.0].extraction.functions[target_ref.1].id;
            if *target_id == site.caller_id {
                continue;
            }
            edges.upsert(GraphEdge::fixed(&site.caller_id, target_id, EdgeKind::Invokes));
            included.push((file_idx, caller_idx));
            included.push(target_ref);
        }
    }

    for (file_idx, record_idx) in included {
        files[file_idx].extraction.functions[record_idx].include = true;
    }
    for (file_idx, site_idx, target) in resolved_sites {
        files[file_idx].extraction.calls[site_idx].resolved_target_file = Some(target);
    }

    edges
}

fn unresolved_warning(path: &str, specifiers: &IndexSet<String>) -> String {
    let sample: Vec<&str> = specifiers
        .iter()
        .take(UNRESOLVED_SAMPLE)
        .map(String::as_str)
        .collect();
    let ellipsis = if specifiers.len() > UNRESOLVED_SAMPLE {
        ", …"
    } else {
        ""
    };
    format!(
        "{path}: {} unresolved import(s): {}{ellipsis}",
        specifiers.len(),
        sample.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_lists_at_most_five() {
        let few: IndexSet<String> = ["a", "b"].into_iter().map(String::from).collect();
        assert_eq!(unresolved_warning("x.ts", &few), "x.ts: 2 unresolved import(s): a, b");

        let many: IndexSet<String> = (1..=7).map(|n| format!("pkg{n}")).collect();
        assert_eq!(
            unresolved_warning("x.ts", &many),
            "x.ts: 7 unresolved import(s): pkg1, pkg2, pkg3, pkg4, pkg5, …"
        );
    }

    #[test]
    fn empty_walk_yields_root_and_warning() {
        let assembly = assemble(WalkOutput::default(), &ModuleResolver::default());
        assert_eq!(assembly.file_graph.nodes.len(), 1);
        assert!(assembly.file_graph.nodes[0].is_directory());
        assert_eq!(assembly.warnings, [NO_SUPPORTED_FILES]);
        assert_eq!(assembly.stats.directory_count, 1);
    }
}
