//! Module resolution against the in-memory file set.
//!
//! Resolution order, first hit wins:
//!
//! 1. Relative specifiers (`./x`, `../x`) against the importing file's directory
//! 2. Path aliases, entry by entry and target by target
//! 3. The repository root
//! 4. A conventional `src/` root
//!
//! Every step goes through the same candidate probing (literal path, extension
//! variants, index files). Probe results are memoized per normalized base.

mod aliases;
mod extensions;

use std::path::Path;

use dashmap::DashMap;
use path_clean::PathClean;
use rustc_hash::FxHashSet;

use crate::language::{Language, detect};

pub use aliases::AliasEntry;

/// Resolves import specifiers to repository-relative paths.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    known: FxHashSet<String>,
    aliases: Vec<AliasEntry>,
    memo: DashMap<(Language, String), Option<String>>,
}

impl ModuleResolver {
    pub fn new(known: impl IntoIterator<Item = impl Into<String>>, aliases: Vec<AliasEntry>) -> Self {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            aliases,
            memo: DashMap::new(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.known.contains(path)
    }

    /// Resolve `specifier` as written in `from`. `None` means unresolved.
    pub fn resolve(&self, from: &str, specifier: &str) -> Option<String> {
        let specifier = specifier.trim();
        if specifier.is_empty() {
            return None;
        }
        let language = detect(from).language().unwrap_or(Language::TypeScript);

        if specifier.starts_with('.') {
            let dir = from.rsplit_once('/').map_or("", |(dir, _)| dir);
            let base = normalize(&extensions::join(dir, specifier));
            return self.probe(&base, language);
        }

        for alias in &self.aliases {
            for candidate in alias.rewrite(specifier) {
                if let Some(hit) = self.probe(&normalize(&candidate), language) {
                    return Some(hit);
                }
            }
        }

        let rooted = normalize(specifier.trim_start_matches('/'));
        self.probe(&rooted, language)
            .or_else(|| self.probe(&normalize(&format!("src/{rooted}")), language))
    }

    fn probe(&self, base: &str, language: Language) -> Option<String> {
        let key = (language, base.to_string());
        if let Some(hit) = self.memo.get(&key) {
            return hit.clone();
        }
        let found = extensions::probe(base, language, &self.known);
        self.memo.insert(key, found.clone());
        found
    }
}

/// Collapse `.` and `..` segments into a posix path without a leading `./`.
fn normalize(path: &str) -> String {
    let cleaned = Path::new(path).clean();
    let cleaned = cleaned.to_string_lossy().replace('\\', "/");
    cleaned.trim_start_matches("./").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(normalize("src/a/../b/./c"), "src/b/c");
        assert_eq!(normalize("./x"), "x");
        assert_eq!(normalize(""), ".");
    }

    #[test]
    fn empty_specifiers_are_unresolved() {
        let resolver = ModuleResolver::new(["a.ts"], Vec::new());
        assert_eq!(resolver.resolve("b.ts", "  "), None);
    }

    #[test]
    fn memo_is_consistent() {
        let resolver = ModuleResolver::new(["lib/x.ts"], Vec::new());
        let first = resolver.resolve("lib/a.ts", "./x");
        let second = resolver.resolve("lib/b.ts", "./x");
        assert_eq!(first.as_deref(), Some("lib/x.ts"));
        assert_eq!(first, second);
    }
}
