//! Language detection by file extension.

use std::fmt;

use serde::Serialize;

/// Languages with an extractor.
///
/// `JavaScript` and `TypeScript` are handled by the AST extractor, every other
/// variant by a pattern extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Go,
    Java,
    Kotlin,
    Scala,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Swift,
    Dart,
    Shell,
    R,
    Julia,
    Lua,
    Haskell,
    OCaml,
    Erlang,
    Elixir,
    Clojure,
    Perl,
    Sql,
    Zig,
    Nim,
    V,
    Solidity,
    FSharp,
    Elm,
    Crystal,
    Groovy,
}

/// Extension table, in the order extensions are probed during resolution.
const EXTENSIONS: &[(Language, &[&str])] = &[
    (Language::TypeScript, &["ts", "tsx", "mts", "cts"]),
    (Language::JavaScript, &["js", "jsx", "mjs", "cjs"]),
    (Language::Python, &["py", "pyi"]),
    (Language::Rust, &["rs"]),
    (Language::Go, &["go"]),
    (Language::Java, &["java"]),
    (Language::Kotlin, &["kt", "kts"]),
    (Language::Scala, &["scala", "sc"]),
    (Language::C, &["c", "h"]),
    (Language::Cpp, &["cpp", "cc", "cxx", "hpp", "hh", "hxx"]),
    (Language::CSharp, &["cs"]),
    (Language::Ruby, &["rb"]),
    (Language::Php, &["php"]),
    (Language::Swift, &["swift"]),
    (Language::Dart, &["dart"]),
    (Language::Shell, &["sh", "bash", "zsh"]),
    (Language::R, &["r"]),
    (Language::Julia, &["jl"]),
    (Language::Lua, &["lua"]),
    (Language::Haskell, &["hs"]),
    (Language::OCaml, &["ml", "mli"]),
    (Language::Erlang, &["erl", "hrl"]),
    (Language::Elixir, &["ex", "exs"]),
    (Language::Clojure, &["clj", "cljs", "cljc"]),
    (Language::Perl, &["pl", "pm"]),
    (Language::Sql, &["sql"]),
    (Language::Zig, &["zig"]),
    (Language::Nim, &["nim"]),
    (Language::V, &["v"]),
    (Language::Solidity, &["sol"]),
    (Language::FSharp, &["fs", "fsx"]),
    (Language::Elm, &["elm"]),
    (Language::Crystal, &["cr"]),
    (Language::Groovy, &["groovy", "gradle"]),
];

/// ECMAScript-family extensions probed for imports from JS/TS files.
const ECMASCRIPT_PROBE: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

const ECMASCRIPT_INDEX: &[&str] = &[
    "index.ts",
    "index.tsx",
    "index.js",
    "index.jsx",
    "index.mjs",
    "index.cjs",
];

impl Language {
    /// Every language in table order.
    pub fn all() -> impl Iterator<Item = Language> {
        EXTENSIONS.iter().map(|(lang, _)| *lang)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Dart => "dart",
            Language::Shell => "shell",
            Language::R => "r",
            Language::Julia => "julia",
            Language::Lua => "lua",
            Language::Haskell => "haskell",
            Language::OCaml => "ocaml",
            Language::Erlang => "erlang",
            Language::Elixir => "elixir",
            Language::Clojure => "clojure",
            Language::Perl => "perl",
            Language::Sql => "sql",
            Language::Zig => "zig",
            Language::Nim => "nim",
            Language::V => "v",
            Language::Solidity => "solidity",
            Language::FSharp => "fsharp",
            Language::Elm => "elm",
            Language::Crystal => "crystal",
            Language::Groovy => "groovy",
        }
    }

    /// File extensions owned by this language, lowercase, without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        EXTENSIONS
            .iter()
            .find(|(lang, _)| *lang == self)
            .map(|(_, exts)| *exts)
            .unwrap_or(&[])
    }

    pub fn is_ecmascript(self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }

    /// Extensions appended to an extensionless specifier during resolution.
    pub fn probe_extensions(self) -> &'static [&'static str] {
        if self.is_ecmascript() {
            ECMASCRIPT_PROBE
        } else {
            self.extensions()
        }
    }

    /// Directory entry files a specifier may point at.
    pub fn index_files(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript | Language::TypeScript => ECMASCRIPT_INDEX,
            Language::Python => &["__init__.py"],
            Language::Rust => &["mod.rs"],
            _ => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which extractor handles a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorChoice {
    /// Full AST extraction (ECMAScript/TypeScript).
    Ast(Language),
    /// Regex-driven extraction for the given language.
    Pattern(Language),
    /// No extractor; the file is skipped without a warning.
    Unsupported,
}

impl ExtractorChoice {
    pub fn language(self) -> Option<Language> {
        match self {
            ExtractorChoice::Ast(lang) | ExtractorChoice::Pattern(lang) => Some(lang),
            ExtractorChoice::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, ExtractorChoice::Unsupported)
    }
}

/// Lowercased extension of the last path segment, if any.
pub fn extension_of(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Pick the extractor for `path`. Depends only on the extension.
pub fn detect(path: &str) -> ExtractorChoice {
    let Some(ext) = extension_of(path) else {
        return ExtractorChoice::Unsupported;
    };
    for (lang, exts) in EXTENSIONS {
        if exts.contains(&ext.as_str()) {
            return if lang.is_ecmascript() {
                ExtractorChoice::Ast(*lang)
            } else {
                ExtractorChoice::Pattern(*lang)
            };
        }
    }
    ExtractorChoice::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecmascript_family_uses_ast() {
        for path in ["a.js", "a.jsx", "a.ts", "a.tsx", "a.mjs", "a.cjs", "types.d.ts"] {
            assert!(matches!(detect(path), ExtractorChoice::Ast(_)), "{path}");
        }
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect("src/App.TSX"), ExtractorChoice::Ast(Language::TypeScript));
        assert_eq!(detect("analysis/plot.R"), ExtractorChoice::Pattern(Language::R));
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        assert_eq!(detect("bin/tool.exe"), ExtractorChoice::Unsupported);
        assert_eq!(detect("Makefile"), ExtractorChoice::Unsupported);
        assert_eq!(detect(".gitignore"), ExtractorChoice::Unsupported);
    }

    #[test]
    fn pattern_family_covers_thirty_languages() {
        let pattern = Language::all().filter(|l| !l.is_ecmascript()).count();
        assert!(pattern >= 30, "only {pattern} pattern languages");
    }

    #[test]
    fn extensions_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for lang in Language::all() {
            for ext in lang.extensions() {
                assert!(seen.insert(*ext), "duplicate extension {ext}");
            }
        }
    }
}
