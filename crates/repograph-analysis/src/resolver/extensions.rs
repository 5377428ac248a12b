//! Candidate probing: literal path, extension variants, then index files.

use rustc_hash::FxHashSet;

use crate::language::Language;

/// ESM-style `.js` specifiers that are written against TypeScript sources.
const ESM_REWRITES: &[(&str, &[&str])] = &[
    (".js", &["ts", "tsx"]),
    (".jsx", &["tsx"]),
    (".mjs", &["mts"]),
    (".cjs", &["cts"]),
];

/// First candidate for `base` present in `known`.
pub(super) fn probe(base: &str, language: Language, known: &FxHashSet<String>) -> Option<String> {
    if base.is_empty() {
        return None;
    }
    if base != "." && known.contains(base) {
        return Some(base.to_string());
    }

    if base != "." {
        for ext in language.probe_extensions() {
            let candidate = format!("{base}.{ext}");
            if known.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    if language.is_ecmascript() {
        for (written, sources) in ESM_REWRITES {
            if let Some(stem) = base.strip_suffix(written) {
                for ext in *sources {
                    let candidate = format!("{stem}.{ext}");
                    if known.contains(&candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
    }

    language
        .index_files()
        .iter()
        .map(|index| join(base, index))
        .find(|candidate| known.contains(candidate))
}

/// Join two posix path fragments, treating `""` and `"."` as the root.
pub(super) fn join(base: &str, leaf: &str) -> String {
    if base.is_empty() || base == "." {
        leaf.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), leaf)
    }
}
