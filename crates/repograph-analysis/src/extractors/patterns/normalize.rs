//! Rewriting of raw import strings into specifiers the module resolver can use.

/// How the text captured by an import rule is turned into specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ImportStyle {
    /// Already a path-like specifier; kept as written.
    Path,
    /// A path relative to the importing file, with or without a leading `./`.
    RelativePath,
    /// `a.b.C` or `a.b.*` package paths.
    Dotted,
    /// `from ..pkg.mod import x`
    PythonFrom,
    /// `import a.b, c as d`
    PythonImport,
    /// `mod name;`
    RustMod,
    /// `use crate::a::b`, `use super::x`, `use serde::Deserialize`
    RustUse,
    /// `#include "x.h"` (system includes are dropped)
    CInclude,
    /// `Foo::Bar` (Perl) or `App\Models\User` (PHP)
    Namespaced,
    /// `my-app.core` becomes `my_app/core`
    Clojure,
    /// `MyApp.FooBar` becomes `lib/my_app/foo_bar`
    Elixir,
    /// `open Foo_bar` becomes `./foo_bar`
    OCaml,
    /// `@import("x.zig")`; `std`, `builtin`, and `root` are dropped
    Zig,
    /// `import a, b/c, std/strutils`
    NimList,
    /// Body of a Go `import ( ... )` block
    GoBlock,
    /// Dart URIs; `dart:` libraries are dropped
    DartUri,
}

/// Normalize one captured import string.
pub(super) fn normalize(style: ImportStyle, raw: &str, from_path: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    match style {
        ImportStyle::Path => vec![raw.to_string()],
        ImportStyle::RelativePath => vec![relative(raw)],
        ImportStyle::Dotted => vec![dotted(raw)],
        ImportStyle::PythonFrom => vec![python_from(raw)],
        ImportStyle::PythonImport => raw
            .split(',')
            .filter_map(|part| part.split_whitespace().next())
            .map(dotted)
            .collect(),
        ImportStyle::RustMod => vec![rust_child_module(raw, from_path)],
        ImportStyle::RustUse => rust_use(raw, from_path).into_iter().collect(),
        ImportStyle::CInclude => c_include(raw).into_iter().collect(),
        ImportStyle::Namespaced => vec![raw.replace("::", "/").replace('\\', "/")],
        ImportStyle::Clojure => vec![raw.replace('-', "_").replace('.', "/")],
        ImportStyle::Elixir => vec![elixir(raw)],
        ImportStyle::OCaml => vec![format!("./{}", uncapitalize(raw))],
        ImportStyle::Zig => match raw {
            "std" | "builtin" | "root" => Vec::new(),
            other => vec![relative(other)],
        },
        ImportStyle::NimList => raw
            .split(',')
            .map(str::trim)
            .filter(|module| !module.is_empty() && !module.starts_with("std/"))
            .map(relative)
            .collect(),
        ImportStyle::GoBlock => raw
            .split('"')
            .skip(1)
            .step_by(2)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect(),
        ImportStyle::DartUri => {
            if raw.starts_with("dart:") {
                Vec::new()
            } else if raw.starts_with("package:") {
                vec![raw.to_string()]
            } else {
                vec![relative(raw)]
            }
        }
    }
}

fn relative(raw: &str) -> String {
    if raw.starts_with('.') || raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("./{raw}")
    }
}

fn dotted(raw: &str) -> String {
    raw.trim_end_matches(".*").replace('.', "/")
}

fn python_from(raw: &str) -> String {
    let module = raw.trim_start_matches('.');
    let dots = raw.len() - module.len();
    let module = module.replace('.', "/");
    match dots {
        0 => module,
        1 if module.is_empty() => ".".to_string(),
        1 => format!("./{module}"),
        n => {
            let up = "../".repeat(n - 1);
            if module.is_empty() {
                up.trim_end_matches('/').to_string()
            } else {
                format!("{up}{module}")
            }
        }
    }
}

fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

/// Whether `path` owns its directory as a module root (`lib.rs`, `main.rs`, `mod.rs`).
fn is_module_root(path: &str) -> bool {
    matches!(file_stem(path), "lib" | "main" | "mod")
}

fn rust_child_module(name: &str, from_path: &str) -> String {
    if is_module_root(from_path) {
        format!("./{name}")
    } else {
        format!("./{}/{name}", file_stem(from_path))
    }
}

fn rust_use(raw: &str, from_path: &str) -> Option<String> {
    let mut segments = raw.split("::").filter(|s| !s.is_empty());
    let first = segments.next()?;
    match first {
        "std" | "core" | "alloc" => None,
        "crate" => {
            let module = segments.next()?;
            let root = crate_source_root(from_path);
            Some(if root.is_empty() {
                format!("/{module}")
            } else {
                format!("/{root}/{module}")
            })
        }
        "self" => segments.next().map(|m| rust_child_module(m, from_path)),
        "super" => segments.next().map(|m| {
            if is_module_root(from_path) {
                format!("../{m}")
            } else {
                format!("./{m}")
            }
        }),
        external => Some(external.to_string()),
    }
}

/// Directory holding the crate root of `from_path`: everything up to the
/// first `src` segment, or the file's own directory.
fn crate_source_root(from_path: &str) -> String {
    let segments: Vec<&str> = from_path.split('/').collect();
    let dirs = &segments[..segments.len().saturating_sub(1)];
    match dirs.iter().position(|s| *s == "src") {
        Some(idx) => dirs[..=idx].join("/"),
        None => dirs.join("/"),
    }
}

fn c_include(raw: &str) -> Option<String> {
    let quoted = raw.strip_prefix('"')?.strip_suffix('"')?;
    Some(relative(quoted))
}

fn elixir(raw: &str) -> String {
    let path: Vec<String> = raw.split('.').map(snake_case).collect();
    format!("lib/{}", path.join("/"))
}

fn snake_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    for (idx, ch) in segment.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn uncapitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
