//! Path-alias rewriting (`@/components/*` style mappings).

use serde::{Deserialize, Serialize};

/// One wildcard path mapping.
///
/// A specifier matches when it starts with `prefix` and ends with `suffix`;
/// the text in between is substituted for `*` in each target (or appended
/// when a target has no wildcard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub targets: Vec<String>,
}

impl AliasEntry {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an entry from a mapping key such as `@app/*` or `~utils`.
    pub fn from_pattern(pattern: &str, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let (prefix, suffix) = pattern.split_once('*').unwrap_or((pattern, ""));
        Self::new(prefix, suffix, targets)
    }

    /// The wildcard remainder if `specifier` matches this entry.
    pub fn remainder<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        specifier
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    /// Rewritten candidates for `specifier`, in target order.
    pub fn rewrite(&self, specifier: &str) -> Vec<String> {
        let Some(remainder) = self.remainder(specifier) else {
            return Vec::new();
        };
        self.targets
            .iter()
            .map(|target| substitute(target, remainder))
            .collect()
    }
}

fn substitute(target: &str, remainder: &str) -> String {
    if target.contains('*') {
        target.replacen('*', remainder, 1)
    } else if remainder.is_empty() {
        target.to_string()
    } else {
        format!(
            "{}/{}",
            target.trim_end_matches('/'),
            remainder.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_remainder_is_substituted() {
        let entry = AliasEntry::from_pattern("@/*", ["src/*", "lib/*"]);
        assert_eq!(entry.prefix, "@/");
        assert_eq!(entry.rewrite("@/ui/button"), ["src/ui/button", "lib/ui/button"]);
        assert!(entry.rewrite("react").is_empty());
    }

    #[test]
    fn suffix_must_match() {
        let entry = AliasEntry::from_pattern("assets/*.svg", ["static/icons/*.svg"]);
        assert_eq!(entry.rewrite("assets/logo.svg"), ["static/icons/logo.svg"]);
        assert!(entry.rewrite("assets/logo.png").is_empty());
    }

    #[test]
    fn plain_targets_are_joined() {
        let entry = AliasEntry::new("~utils", "", ["src/utils/"]);
        assert_eq!(entry.rewrite("~utils"), ["src/utils/"]);
        assert_eq!(entry.rewrite("~utils/date"), ["src/utils/date"]);
    }
}
