//! Repository file provider.
//!
//! Walks a directory with `.gitignore` semantics and loads every supported
//! source file into a [`FileMap`] keyed by its repository-relative, `/`
//! separated path. Entries are visited in file-name order so the map (and
//! therefore `max_files` selection) is stable across runs.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, info};

use repograph_analysis::{FileMap, detect};

use crate::error::{CliError, Result};

/// Directories that never contain first-party sources.
const SKIP_DIRS: &[&str] = &["node_modules", "target", "__pycache__", "dist", "vendor"];

#[derive(Debug, Clone, Copy)]
pub struct ProviderOptions {
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Stop after this many supported files.
    pub limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Collected {
    pub files: FileMap,
    /// Supported files that were not loaded (too large or not UTF-8).
    pub skipped: usize,
    /// True when `limit` cut the walk short.
    pub truncated: bool,
}

/// Load the supported files under `root`.
pub fn collect(root: &Path, options: ProviderOptions) -> Result<Collected> {
    if !root.is_dir() {
        return Err(CliError::RootNotFound(root.to_path_buf()));
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(".repographignore")
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.file_name().to_str().is_some_and(|name| SKIP_DIRS.contains(&name)))
        })
        .build();

    let mut collected = Collected::default();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };
        if !detect(&relative).is_supported() {
            continue;
        }

        if options.limit.is_some_and(|limit| collected.files.len() >= limit) {
            collected.truncated = true;
            break;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > options.max_file_size {
            debug!(path = %relative, size, "skipping large file");
            collected.skipped += 1;
            continue;
        }

        match fs::read(entry.path()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => {
                    collected.files.insert(relative, content);
                }
                Err(_) => {
                    debug!(path = %relative, "skipping non-UTF-8 file");
                    collected.skipped += 1;
                }
            },
            Err(err) => {
                debug!(path = %relative, error = %err, "skipping unreadable file");
                collected.skipped += 1;
            }
        }
    }

    if collected.truncated {
        info!(limit = collected.files.len(), "file limit reached, remaining files ignored");
    }
    debug!(files = collected.files.len(), skipped = collected.skipped, "collected repository files");
    Ok(collected)
}

/// `/`-separated path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn options() -> ProviderOptions {
        ProviderOptions {
            max_file_size: 1024,
            limit: None,
        }
    }

    fn write(root: &Path, path: &str, content: &[u8]) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[test]
    fn collects_supported_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/b.ts", b"export const b = 1;");
        write(temp.path(), "src/a.py", b"def a(): pass");
        write(temp.path(), "README.md", b"# readme");
        write(temp.path(), "node_modules/pkg/index.js", b"module.exports = 1;");

        let collected = collect(temp.path(), options()).unwrap();
        let keys: Vec<&str> = collected.files.keys().map(String::as_str).collect();
        assert_eq!(keys, ["src/a.py", "src/b.ts"]);
        assert_eq!(collected.skipped, 0);
    }

    #[test]
    fn honours_gitignore_without_a_repository() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".gitignore", b"generated/\n");
        write(temp.path(), "generated/out.js", b"x();");
        write(temp.path(), "main.js", b"x();");

        let collected = collect(temp.path(), options()).unwrap();
        assert_eq!(collected.files.len(), 1);
        assert!(collected.files.contains_key("main.js"));
    }

    #[test]
    fn large_and_binary_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "big.ts", &vec![b'a'; 2048]);
        write(temp.path(), "bin.ts", &[0xff, 0xfe, 0x00]);
        write(temp.path(), "ok.ts", b"export {}");

        let collected = collect(temp.path(), options()).unwrap();
        assert_eq!(collected.files.len(), 1);
        assert_eq!(collected.skipped, 2);
    }

    #[test]
    fn limit_truncates_the_walk() {
        let temp = TempDir::new().unwrap();
        for name in ["a.ts", "b.ts", "c.ts"] {
            write(temp.path(), name, b"export {}");
        }
        let collected = collect(
            temp.path(),
            ProviderOptions {
                limit: Some(2),
                ..options()
            },
        )
        .unwrap();
        assert!(collected.truncated);
        let keys: Vec<&str> = collected.files.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a.ts", "b.ts"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent");
        assert!(matches!(
            collect(&missing, options()),
            Err(CliError::RootNotFound(_))
        ));
    }
}
