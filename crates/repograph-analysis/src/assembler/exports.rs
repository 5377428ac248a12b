//! `"{file}:{exportedAs}"` lookup with re-export chain following.

use rustc_hash::{FxHashMap, FxHashSet};

use repograph_graph::BindingType;

use crate::walker::ExtractedFile;

/// Maximum number of `export ... from` hops followed for one lookup.
const MAX_REEXPORT_DEPTH: usize = 8;

/// Location of a record: `(file index, record index)`.
pub(super) type RecordRef = (usize, usize);

pub(super) struct ExportIndex {
    exports: FxHashMap<String, RecordRef>,
    file_index: FxHashMap<String, usize>,
}

impl ExportIndex {
    pub(super) fn build(files: &[ExtractedFile]) -> Self {
        let mut exports = FxHashMap::default();
        let mut file_index = FxHashMap::default();
        for (file_idx, file) in files.iter().enumerate() {
            file_index.insert(file.path.clone(), file_idx);
            for (record_idx, record) in file.extraction.functions.iter().enumerate() {
                if let (true, Some(name)) = (record.is_exported, &record.exported_as) {
                    exports
                        .entry(export_key(&file.path, name))
                        .or_insert((file_idx, record_idx));
                }
            }
        }
        Self {
            exports,
            file_index,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.exports.len()
    }

    /// Find the record exported from `file` as `name`, following re-exports.
    pub(super) fn lookup(&self, files: &[ExtractedFile], file: &str, name: &str) -> Option<RecordRef> {
        let mut visited = FxHashSet::default();
        self.lookup_from(files, file, name, 0, &mut visited)
    }

    fn lookup_from(
        &self,
        files: &[ExtractedFile],
        file: &str,
        name: &str,
        depth: usize,
        visited: &mut FxHashSet<(String, String)>,
    ) -> Option<RecordRef> {
        if let Some(found) = self.exports.get(&export_key(file, name)) {
            return Some(*found);
        }
        if depth >= MAX_REEXPORT_DEPTH || !visited.insert((file.to_string(), name.to_string())) {
            return None;
        }

        let source = &files[*self.file_index.get(file)?];
        for binding in source.extraction.imports.iter().filter(|b| b.reexport) {
            let Some(target) = binding.resolved_target.as_deref() else {
                continue;
            };
            if binding.specifiers.is_empty() {
                // `export *` never forwards the default export.
                if name != "default"
                    && let Some(found) = self.lookup_from(files, target, name, depth + 1, visited)
                {
                    return Some(found);
                }
                continue;
            }
            for spec in &binding.specifiers {
                if spec.binding_type != BindingType::Namespace
                    && spec.local_name == name
                    && let Some(found) =
                        self.lookup_from(files, target, &spec.imported_name, depth + 1, visited)
                {
                    return Some(found);
                }
            }
        }
        None
    }
}

pub(super) fn export_key(file: &str, name: &str) -> String {
    format!("{file}:{name}")
}
