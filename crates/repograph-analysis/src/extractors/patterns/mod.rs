//! Regex-driven extractors for languages without a parser integration.
//!
//! These see imports and declarations only. They never produce call sites,
//! so pattern-extracted records appear as graph nodes but are never wired
//! into function edges.

mod languages;
mod normalize;

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use repograph_graph::{FunctionKind, FunctionRecord, ImportBinding, ImportKind, SourceSpan};

use self::languages::rule_set;
use self::normalize::{ImportStyle, normalize};
use super::line_index::LineIndex;
use super::{ExtractError, Extractor, FileExtraction, preview};
use crate::language::Language;

struct CompiledRules {
    imports: Vec<(Regex, ImportStyle)>,
    declarations: Vec<(Regex, FunctionKind)>,
    reserved: &'static [&'static str],
}

impl CompiledRules {
    fn compile(language: Language) -> Result<Self, String> {
        let rules = rule_set(language).ok_or_else(|| "no rule set".to_string())?;
        let imports = rules
            .imports
            .iter()
            .map(|(pattern, style)| Ok((Regex::new(pattern)?, *style)))
            .collect::<Result<Vec<_>, regex::Error>>()
            .map_err(|e| e.to_string())?;
        let declarations = rules
            .declarations
            .iter()
            .map(|(pattern, kind)| Ok((Regex::new(pattern)?, *kind)))
            .collect::<Result<Vec<_>, regex::Error>>()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            imports,
            declarations,
            reserved: rules.reserved,
        })
    }
}

static COMPILED: LazyLock<FxHashMap<Language, Result<CompiledRules, String>>> =
    LazyLock::new(|| {
        Language::all()
            .filter(|lang| !lang.is_ecmascript())
            .map(|lang| (lang, CompiledRules::compile(lang)))
            .collect()
    });

fn compiled(language: Language) -> Result<&'static CompiledRules, ExtractError> {
    match COMPILED.get(&language) {
        Some(Ok(rules)) => Ok(rules),
        Some(Err(message)) => Err(ExtractError::Rules {
            language,
            message: message.clone(),
        }),
        None => Err(ExtractError::Rules {
            language,
            message: "language is handled by the AST extractor".to_string(),
        }),
    }
}

/// Best-effort extractor for one non-ECMAScript language.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    language: Language,
    preview_chars: usize,
}

impl PatternExtractor {
    pub fn new(language: Language, preview_chars: usize) -> Self {
        Self {
            language,
            preview_chars,
        }
    }
}

impl Extractor for PatternExtractor {
    fn language(&self) -> Language {
        self.language
    }

    fn extract(&self, path: &str, content: &str) -> Result<FileExtraction, ExtractError> {
        let rules = compiled(self.language)?;
        let lines = LineIndex::new(content);

        let mut found_imports = Vec::new();
        for (regex, style) in &rules.imports {
            for caps in regex.captures_iter(content) {
                if let Some(spec) = caps.name("spec") {
                    found_imports.push((spec.start(), *style, spec.as_str()));
                }
            }
        }
        found_imports.sort_by_key(|(offset, _, _)| *offset);

        let mut seen = FxHashSet::default();
        let mut imports = Vec::new();
        for (_, style, raw) in found_imports {
            for specifier in normalize(style, raw, path) {
                if seen.insert(specifier.clone()) {
                    imports.push(ImportBinding::new(specifier, ImportKind::Es));
                }
            }
        }

        let mut found_decls = Vec::new();
        for (regex, kind) in &rules.declarations {
            for caps in regex.captures_iter(content) {
                if let Some(name) = caps.name("name")
                    && !rules.reserved.contains(&name.as_str())
                {
                    found_decls.push((name.start(), *kind, name.as_str()));
                }
            }
        }
        found_decls.sort_by_key(|(offset, _, _)| *offset);

        let mut seen = FxHashSet::default();
        let mut used_ids: FxHashSet<String> = FxHashSet::default();
        let mut functions = Vec::new();
        for (offset, kind, name) in found_decls {
            let line = lines.line(offset as u32);
            if !seen.insert((name, line)) {
                continue;
            }
            let local_id = if used_ids.contains(name) {
                format!("{name}@{line}")
            } else {
                name.to_string()
            };
            used_ids.insert(local_id.clone());

            let mut record =
                FunctionRecord::new(path, &local_id, name, kind).with_span(SourceSpan::line(line));
            record.include = true;
            functions.push(record);
        }

        Ok(FileExtraction {
            imports,
            functions,
            calls: Vec::new(),
            preview: preview(content, self.preview_chars),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(language: Language, path: &str, source: &str) -> FileExtraction {
        PatternExtractor::new(language, 100)
            .extract(path, source)
            .expect("rules compile")
    }

    fn names(extraction: &FileExtraction) -> Vec<&str> {
        extraction
            .functions
            .iter()
            .map(|f| f.display_name.as_str())
            .collect()
    }

    fn sources(extraction: &FileExtraction) -> Vec<&str> {
        extraction.imports.iter().map(|i| i.source.as_str()).collect()
    }

    #[test]
    fn every_pattern_language_compiles() {
        for language in Language::all().filter(|l| !l.is_ecmascript()) {
            assert!(compiled(language).is_ok(), "{language} rules failed to compile");
        }
    }

    #[test]
    fn python_module() {
        let extraction = extract(
            Language::Python,
            "app/views.py",
            "import os\nfrom .models import User\n\nclass View:\n    def get(self):\n        pass\n\nasync def main():\n    pass\n",
        );
        assert_eq!(sources(&extraction), ["os", "./models"]);
        assert_eq!(names(&extraction), ["View", "get", "main"]);
        assert_eq!(extraction.functions[0].kind, FunctionKind::Class);
        assert_eq!(extraction.functions[2].id, "app/views.py::main");
        assert!(extraction.functions.iter().all(|f| f.include && !f.is_exported));
        assert!(extraction.calls.is_empty());
    }

    #[test]
    fn c_reserved_words_are_filtered() {
        let source = "#include <stdio.h>\n#include \"util.h\"\n\nint main(void)\n{\n  if (x) {\n  }\n}\n\nstatic int helper(int a) {\n  return a;\n}\n";
        let extraction = extract(Language::C, "src/main.c", source);
        assert_eq!(sources(&extraction), ["./util.h"]);
        assert_eq!(names(&extraction), ["main", "helper"]);
    }

    #[test]
    fn rust_modules() {
        let extraction = extract(
            Language::Rust,
            "src/lib.rs",
            "pub mod parser;\nuse crate::parser::parse;\nuse std::fmt;\n\npub fn run() {}\nstruct State;\n",
        );
        assert_eq!(sources(&extraction), ["./parser", "/src/parser"]);
        assert_eq!(names(&extraction), ["run", "State"]);
    }

    #[test]
    fn go_import_blocks() {
        let extraction = extract(
            Language::Go,
            "cmd/main.go",
            "package main\n\nimport (\n\t\"fmt\"\n\t\"example.com/app/internal/server\"\n)\n\nfunc main() {}\nfunc (s *Server) Start() {}\n",
        );
        assert_eq!(sources(&extraction), ["fmt", "example.com/app/internal/server"]);
        assert_eq!(names(&extraction), ["main", "Start"]);
    }

    #[test]
    fn duplicate_names_get_line_suffix() {
        let extraction = extract(
            Language::Ruby,
            "lib/a.rb",
            "class A\n  def call\n  end\nend\nclass B\n  def call\n  end\nend\n",
        );
        let ids: Vec<_> = extraction.functions.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["lib/a.rb::A", "lib/a.rb::call", "lib/a.rb::B", "lib/a.rb::call@6"]);
        assert_eq!(extraction.functions[3].source_span, Some(SourceSpan::line(6)));
    }

    #[test]
    fn shell_function_forms_collapse() {
        let extraction = extract(
            Language::Shell,
            "bin/run.sh",
            "source ./lib.sh\nfunction build() {\n  :\n}\ndeploy() {\n  :\n}\n",
        );
        assert_eq!(sources(&extraction), ["./lib.sh"]);
        assert_eq!(names(&extraction), ["build", "deploy"]);
    }

    #[test]
    fn ecmascript_has_no_rules() {
        let err = PatternExtractor::new(Language::TypeScript, 10)
            .extract("a.ts", "")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Rules { .. }));
    }
}
