//! Per-file extractors and the extension registry that dispatches to them.

pub mod ast;
mod line_index;
pub mod patterns;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use repograph_graph::{CallSite, FunctionRecord, ImportBinding};

use crate::language::{ExtractorChoice, Language, detect, extension_of};

pub use ast::AstExtractor;
pub use patterns::PatternExtractor;

/// Facts extracted from one source file.
#[derive(Debug, Clone, Default)]
pub struct FileExtraction {
    pub imports: Vec<ImportBinding>,
    pub functions: Vec<FunctionRecord>,
    pub calls: Vec<CallSite>,
    /// Leading characters of the file, kept for enrichment digests.
    pub preview: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to parse {path}:{line}: {message}")]
    Parse {
        path: String,
        line: u32,
        message: String,
    },

    #[error("no extraction rules available for {language}: {message}")]
    Rules {
        language: Language,
        message: String,
    },
}

/// A language-specific extractor.
pub trait Extractor: Send + Sync {
    fn language(&self) -> Language;

    /// Extract imports, declarations, and call sites from `content`.
    fn extract(&self, path: &str, content: &str) -> Result<FileExtraction, ExtractError>;
}

/// Maps lowercase file extensions to extractors.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    by_extension: FxHashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry covering every language returned by [`Language::all`].
    pub fn standard(preview_chars: usize) -> Self {
        let mut registry = Self::new();
        for language in Language::all() {
            let extractor: Arc<dyn Extractor> = if language.is_ecmascript() {
                Arc::new(AstExtractor::new(language, preview_chars))
            } else {
                Arc::new(PatternExtractor::new(language, preview_chars))
            };
            for ext in language.extensions() {
                registry.register(ext, Arc::clone(&extractor));
            }
        }
        registry
    }

    /// Register (or replace) the extractor for an extension.
    pub fn register(&mut self, extension: &str, extractor: Arc<dyn Extractor>) {
        self.by_extension
            .insert(extension.trim_start_matches('.').to_ascii_lowercase(), extractor);
    }

    /// Extractor for `path`, or `None` when the file is unsupported.
    pub fn for_path(&self, path: &str) -> Option<&Arc<dyn Extractor>> {
        let ext = extension_of(path)?;
        self.by_extension.get(&ext)
    }

    /// Extractor choice for `path` as seen by this registry.
    pub fn choice(&self, path: &str) -> ExtractorChoice {
        match self.for_path(path) {
            Some(extractor) if extractor.language().is_ecmascript() => {
                ExtractorChoice::Ast(extractor.language())
            }
            Some(extractor) => ExtractorChoice::Pattern(extractor.language()),
            None => detect(path),
        }
    }

    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

/// First `max_chars` characters of `content`.
pub(crate) fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => content[..idx].to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_dispatches_by_extension() {
        let registry = ExtractorRegistry::standard(100);
        assert_eq!(
            registry.for_path("src/a.tsx").map(|e| e.language()),
            Some(Language::TypeScript)
        );
        assert_eq!(
            registry.for_path("pkg/mod.PY").map(|e| e.language()),
            Some(Language::Python)
        );
        assert!(registry.for_path("bin/tool.exe").is_none());
    }

    #[test]
    fn custom_registration_overrides() {
        let mut registry = ExtractorRegistry::standard(100);
        registry.register(".vue", Arc::new(AstExtractor::new(Language::TypeScript, 100)));
        assert_eq!(registry.choice("App.vue"), ExtractorChoice::Ast(Language::TypeScript));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("abc", 10), "abc");
    }
}
