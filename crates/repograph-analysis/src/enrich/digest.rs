//! Condensed per-file summaries sent to the language model.

use serde::Serialize;

use crate::extractors::preview;
use crate::walker::ExtractedFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDigest {
    pub specifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

/// What the model sees of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDigest {
    pub path: String,
    pub language: String,
    pub imports: Vec<ImportDigest>,
    /// Exported names.
    pub exports: Vec<String>,
    /// `caller -> callee` summaries.
    pub calls: Vec<String>,
    /// Function node ids the model may reference.
    pub functions: Vec<String>,
    pub preview: String,
}

impl FileDigest {
    pub(crate) fn from_file(file: &ExtractedFile, preview_chars: usize) -> Self {
        let extraction = &file.extraction;

        let imports = extraction
            .imports
            .iter()
            .map(|binding| ImportDigest {
                specifier: binding.source.clone(),
                resolved: binding.resolved_target.clone(),
            })
            .collect();

        let exports = extraction
            .functions
            .iter()
            .filter_map(|record| record.exported_as.clone())
            .collect();

        let calls = extraction
            .calls
            .iter()
            .map(|site| {
                let callee = match &site.member_name {
                    Some(member) => format!("{}.{member}", site.callee_local_name),
                    None => site.callee_local_name.clone(),
                };
                match &site.source_specifier {
                    Some(source) => format!("{} -> {callee} ({source})", site.caller_id),
                    None => format!("{} -> {callee}", site.caller_id),
                }
            })
            .collect();

        let functions = extraction
            .functions
            .iter()
            .filter(|record| record.include)
            .map(|record| record.id.clone())
            .collect();

        Self {
            path: file.path.clone(),
            language: file.language.name().to_string(),
            imports,
            exports,
            calls,
            functions,
            preview: preview(&extraction.preview, preview_chars),
        }
    }

    fn unresolved_count(&self) -> usize {
        self.imports.iter().filter(|i| i.resolved.is_none()).count()
    }
}

/// Digest the files most likely to benefit from enrichment.
///
/// Files with more unresolved imports come first; ties break on path so the
/// selection is stable across runs.
pub(crate) fn build_digests(
    files: &[ExtractedFile],
    max_files: usize,
    preview_chars: usize,
) -> Vec<FileDigest> {
    let mut digests: Vec<FileDigest> = files
        .iter()
        .map(|file| FileDigest::from_file(file, preview_chars))
        .collect();
    digests.sort_by(|a, b| {
        b.unresolved_count()
            .cmp(&a.unresolved_count())
            .then_with(|| a.path.cmp(&b.path))
    });
    digests.truncate(max_files);
    digests
}
