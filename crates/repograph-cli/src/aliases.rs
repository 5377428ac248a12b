//! Path-alias loading from `tsconfig.json` / `jsconfig.json`.
//!
//! Reads `compilerOptions.baseUrl` and `compilerOptions.paths` and turns
//! them into repository-relative [`AliasEntry`] values. The files are JSONC:
//! comments and trailing commas are stripped before parsing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use path_clean::PathClean;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use repograph_analysis::AliasEntry;

use crate::error::{CliError, Result};

/// Probed in order when no file is configured.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["tsconfig.json", "jsconfig.json"];

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("static regex"));

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: IndexMap<String, Vec<String>>,
}

/// Load aliases for `root`.
///
/// An explicit `config` that cannot be read is an error. A discovered file
/// that fails to parse is logged and ignored.
pub fn load(root: &Path, config: Option<&Path>) -> Result<Vec<AliasEntry>> {
    if let Some(path) = config {
        return load_file(root, path);
    }

    for name in DEFAULT_CONFIG_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        return match load_file(root, &path) {
            Ok(aliases) => Ok(aliases),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable path aliases");
                Ok(Vec::new())
            }
        };
    }
    Ok(Vec::new())
}

fn load_file(root: &Path, path: &Path) -> Result<Vec<AliasEntry>> {
    let text = fs::read_to_string(path).map_err(|e| CliError::Aliases {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: TsConfig =
        serde_json::from_str(&strip_jsonc(&text)).map_err(|e| CliError::Aliases {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let config_dir = path
        .parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let aliases = aliases_from(&config.compiler_options, &config_dir);
    debug!(path = %path.display(), count = aliases.len(), "loaded path aliases");
    Ok(aliases)
}

/// Build alias entries relative to the repository root.
fn aliases_from(options: &CompilerOptions, config_dir: &Path) -> Vec<AliasEntry> {
    let base = repo_relative(&config_dir.join(options.base_url.as_deref().unwrap_or(".")));

    let mut aliases: Vec<AliasEntry> = options
        .paths
        .iter()
        .map(|(pattern, targets)| {
            let targets = targets.iter().map(|target| join_target(&base, target));
            AliasEntry::from_pattern(pattern, targets)
        })
        .collect();

    // Bare specifiers resolve against a non-root baseUrl.
    if options.base_url.is_some() && !base.is_empty() {
        aliases.push(AliasEntry::from_pattern("*", [format!("{base}/*")]));
    }
    aliases
}

fn join_target(base: &str, target: &str) -> String {
    // The wildcard survives path cleaning as an ordinary segment character.
    let joined = repo_relative(&PathBuf::from(base).join(target));
    if target.ends_with('/') && !joined.ends_with('/') {
        format!("{joined}/")
    } else {
        joined
    }
}

/// Cleaned posix path, `""` for the root.
fn repo_relative(path: &Path) -> String {
    let cleaned = path.clean().to_string_lossy().replace('\\', "/");
    match cleaned.as_str() {
        "." | "" => String::new(),
        other => other.trim_start_matches("./").to_string(),
    }
}

/// Remove `//` and `/* */` comments outside strings, then trailing commas.
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    TRAILING_COMMA.replace_all(&out, "$1").into_owned()
}
