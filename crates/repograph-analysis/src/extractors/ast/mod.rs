//! ECMAScript/TypeScript extraction on top of the OXC parser.

mod visitor;

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::{Parser, ParserReturn};
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;

use self::visitor::FileVisitor;
use super::line_index::LineIndex;
use super::{ExtractError, Extractor, FileExtraction, preview};
use crate::language::Language;

/// Full-syntax extractor for JavaScript and TypeScript.
///
/// Call sites are resolved through semantic scoping, so a local binding that
/// shadows an import is never reported as a call to that import.
#[derive(Debug, Clone)]
pub struct AstExtractor {
    language: Language,
    preview_chars: usize,
}

impl AstExtractor {
    pub fn new(language: Language, preview_chars: usize) -> Self {
        Self {
            language,
            preview_chars,
        }
    }

    fn source_type(&self, path: &str) -> SourceType {
        let fallback = if self.language == Language::TypeScript {
            SourceType::ts()
        } else {
            SourceType::mjs()
        };
        let source_type = SourceType::from_path(path).unwrap_or(fallback);
        if self.language == Language::JavaScript {
            source_type.with_jsx(true)
        } else {
            source_type
        }
    }
}

impl Extractor for AstExtractor {
    fn language(&self) -> Language {
        self.language
    }

    fn extract(&self, path: &str, content: &str) -> Result<FileExtraction, ExtractError> {
        let allocator = Allocator::default();
        let ParserReturn {
            program,
            errors,
            panicked,
            ..
        } = Parser::new(&allocator, content, self.source_type(path)).parse();

        let lines = LineIndex::new(content);

        if panicked || !errors.is_empty() {
            let (line, message) = errors
                .first()
                .map(|error| {
                    let line = error
                        .labels
                        .as_ref()
                        .and_then(|labels| labels.first())
                        .map_or(1, |label| lines.line(label.offset() as u32));
                    (line, error.message.to_string())
                })
                .unwrap_or_else(|| (1, "parser aborted".to_string()));
            return Err(ExtractError::Parse {
                path: path.to_string(),
                line,
                message,
            });
        }

        let semantic = SemanticBuilder::new().build(&program).semantic;
        let mut visitor = FileVisitor::new(path, semantic.scoping(), &lines);
        visitor.collect_module_declarations(&program);
        visitor.visit_program(&program);

        let mut extraction = visitor.finish();
        extraction.preview = preview(content, self.preview_chars);
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use repograph_graph::{BindingType, FunctionKind, ImportKind};

    use super::*;

    fn extract(path: &str, source: &str) -> FileExtraction {
        let language = if path.ends_with(".ts") || path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        AstExtractor::new(language, 200)
            .extract(path, source)
            .expect("fixture parses")
    }

    fn record<'a>(extraction: &'a FileExtraction, id: &str) -> &'a repograph_graph::FunctionRecord {
        extraction
            .functions
            .iter()
            .find(|r| r.id == id)
            .unwrap_or_else(|| panic!("no record {id}"))
    }

    #[test]
    fn collects_import_forms() {
        let extraction = extract(
            "src/a.ts",
            r#"
import def, { foo as bar, baz } from './b';
import * as ns from '../c';
import './polyfill';
export { x as y } from './d';
export * from './e';
const lazy = () => import('./f');
"#,
        );
        let sources: Vec<_> = extraction.imports.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, ["./b", "../c", "./polyfill", "./d", "./e", "./f"]);

        let b = &extraction.imports[0];
        assert_eq!(b.specifiers.len(), 3);
        assert_eq!(b.specifiers[0].binding_type, BindingType::Default);
        assert_eq!(b.specifiers[1].local_name, "bar");
        assert_eq!(b.specifiers[1].imported_name, "foo");

        assert_eq!(extraction.imports[1].specifiers[0].binding_type, BindingType::Namespace);
        assert!(extraction.imports[2].is_side_effect());
        assert!(extraction.imports[3].reexport);
        assert_eq!(extraction.imports[3].specifiers[0].local_name, "y");
        assert_eq!(extraction.imports[3].specifiers[0].imported_name, "x");
        assert!(extraction.imports[4].reexport);
        assert_eq!(extraction.imports[5].kind, ImportKind::Dynamic);
    }

    #[test]
    fn records_exports_and_names() {
        let extraction = extract(
            "src/a.ts",
            r#"
export function run() {}
export const helper = () => 1;
function internal() {}
class Widget {
  render() {}
}
export { Widget as Gadget };
export default function () {}
"#,
        );
        let run = record(&extraction, "src/a.ts::run");
        assert!(run.is_exported && run.include);
        assert_eq!(run.exported_as.as_deref(), Some("run"));

        let helper = record(&extraction, "src/a.ts::helper");
        assert_eq!(helper.kind, FunctionKind::Arrow);
        assert_eq!(helper.exported_as.as_deref(), Some("helper"));

        let internal = record(&extraction, "src/a.ts::internal");
        assert!(!internal.is_exported && !internal.include);

        let widget = record(&extraction, "src/a.ts::Widget");
        assert_eq!(widget.exported_as.as_deref(), Some("Gadget"));
        let render = record(&extraction, "src/a.ts::Widget.render");
        assert_eq!(render.kind, FunctionKind::Method);

        let default = extraction
            .functions
            .iter()
            .find(|r| r.exported_as.as_deref() == Some("default"))
            .expect("default export");
        assert!(default.display_name.starts_with("anonymous_"));
        assert_eq!(default.kind, FunctionKind::Anonymous);
    }

    #[test]
    fn exported_import_becomes_reexport() {
        let extraction = extract(
            "src/index.ts",
            "import { a } from './a';\nimport * as ns from './ns';\nexport { a as b, ns };\n",
        );
        assert_eq!(extraction.imports.len(), 3);
        let forwarded = &extraction.imports[2];
        assert!(forwarded.reexport);
        assert_eq!(forwarded.source, "./a");
        assert_eq!(forwarded.specifiers[0].local_name, "b");
        assert_eq!(forwarded.specifiers[0].imported_name, "a");
    }

    #[test]
    fn calls_resolve_through_bindings() {
        let extraction = extract(
            "src/a.ts",
            r#"
import { foo as bar } from './b';
import * as ns from './c';
export function run() {
  bar();
  bar();
  ns.go();
  local();
}
function local() {}
"#,
        );
        assert_eq!(extraction.calls.len(), 2);

        let direct = &extraction.calls[0];
        assert_eq!(direct.caller_id, "src/a.ts::run");
        assert_eq!(direct.callee_local_name, "bar");
        assert_eq!(direct.callee_imported_name.as_deref(), Some("foo"));
        assert_eq!(direct.source_specifier.as_deref(), Some("./b"));

        let member = &extraction.calls[1];
        assert!(member.is_namespace_call());
        assert_eq!(member.callee_imported_name.as_deref(), Some("go"));
        assert_eq!(member.source_specifier.as_deref(), Some("./c"));
    }

    #[test]
    fn shadowed_imports_are_not_calls() {
        let extraction = extract(
            "src/a.ts",
            r#"
import { foo } from './b';
export function run(foo: () => void) {
  foo();
}
"#,
        );
        assert!(extraction.calls.is_empty());
    }

    #[test]
    fn top_level_calls_use_module_record() {
        let extraction = extract("src/main.ts", "import { boot } from './boot';\nboot();\n");
        assert_eq!(extraction.calls.len(), 1);
        assert_eq!(extraction.calls[0].caller_id, "src/main.ts::<module>");
        assert!(record(&extraction, "src/main.ts::<module>").is_module());
    }

    #[test]
    fn commonjs_requires_and_exports() {
        let extraction = extract(
            "lib/index.js",
            r#"
const util = require('./util');
const { parse } = require('./parser');
require('./side-effect');
function main() {
  util.format();
  parse();
}
module.exports = main;
exports.helper = function () {};
"#,
        );
        let sources: Vec<_> = extraction.imports.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, ["./util", "./parser", "./side-effect"]);
        assert!(extraction.imports.iter().all(|i| i.kind == ImportKind::Require));

        assert_eq!(extraction.calls.len(), 2);
        assert_eq!(extraction.calls[0].member_name.as_deref(), Some("format"));
        assert_eq!(extraction.calls[1].callee_imported_name.as_deref(), Some("parse"));

        let main = record(&extraction, "lib/index.js::main");
        assert_eq!(main.exported_as.as_deref(), Some("default"));
        let helper = record(&extraction, "lib/index.js::helper");
        assert_eq!(helper.exported_as.as_deref(), Some("helper"));
    }

    #[test]
    fn duplicate_names_get_line_suffix() {
        let extraction = extract(
            "src/a.js",
            "function a() {\n  const f = () => 1;\n}\nfunction b() {\n  const f = () => 2;\n}\n",
        );
        assert!(extraction.functions.iter().any(|r| r.id == "src/a.js::f"));
        assert!(extraction.functions.iter().any(|r| r.id == "src/a.js::f@5"));
    }

    #[test]
    fn jsx_in_js_files_parses() {
        let extraction = extract(
            "src/App.js",
            "export default function App() { return <div className=\"x\" />; }\n",
        );
        assert_eq!(
            record(&extraction, "src/App.js::App").exported_as.as_deref(),
            Some("default")
        );
    }

    #[test]
    fn syntax_errors_report_line() {
        let err = AstExtractor::new(Language::TypeScript, 10)
            .extract("src/bad.ts", "const ok = 1;\nconst = ;\n")
            .unwrap_err();
        match err {
            ExtractError::Parse { path, line, .. } => {
                assert_eq!(path, "src/bad.ts");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn preview_is_truncated() {
        let extraction = AstExtractor::new(Language::JavaScript, 5)
            .extract("a.js", "const value = 1;")
            .unwrap();
        assert_eq!(extraction.preview, "const");
    }
}
