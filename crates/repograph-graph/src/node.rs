use serde::{Deserialize, Serialize};

use crate::{FunctionKind, FunctionRecord, SourceSpan};

/// Id of the synthesized repository root directory node.
pub const ROOT_DIRECTORY: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNodeKind {
    File,
    Directory,
}

/// A file or directory in the scanned tree. The id is the repository path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: String,
    pub label: String,
    pub path: String,
    pub kind: FileNodeKind,
    /// Extractor language for files (`typescript`, `python`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FileNode {
    pub fn file(path: impl Into<String>, language: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            label: basename(&path).to_string(),
            path,
            kind: FileNodeKind::File,
            language: Some(language.into()),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        let label = if path == ROOT_DIRECTORY {
            ROOT_DIRECTORY.to_string()
        } else {
            basename(&path).to_string()
        };
        Self {
            id: path.clone(),
            label,
            path,
            kind: FileNodeKind::Directory,
            language: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileNodeKind::Directory
    }
}

/// A function, class, or module pseudo-record materialized as a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    pub id: String,
    pub label: String,
    pub file_path: String,
    pub kind: FunctionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_as: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_span: Option<SourceSpan>,
}

impl From<&FunctionRecord> for FunctionNode {
    fn from(record: &FunctionRecord) -> Self {
        Self {
            id: record.id.clone(),
            label: record.display_name.clone(),
            file_path: record.file_path.clone(),
            kind: record.kind,
            exported_as: record.exported_as.clone(),
            source_span: record.source_span,
        }
    }
}

/// Last `/`-separated segment of a repository path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Every ancestor directory of `path`, nearest first, ending with the root.
///
/// `"src/sub/b.ts"` yields `["src/sub", "src", "."]`.
pub fn ancestor_directories(path: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut current = path;
    while let Some(idx) = current.rfind('/') {
        current = &current[..idx];
        if current.is_empty() {
            break;
        }
        dirs.push(current.to_string());
    }
    dirs.push(ROOT_DIRECTORY.to_string());
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_include_root() {
        assert_eq!(ancestor_directories("src/sub/b.ts"), vec!["src/sub", "src", "."]);
        assert_eq!(ancestor_directories("main.ts"), vec!["."]);
    }

    #[test]
    fn file_label_is_basename() {
        let node = FileNode::file("src/sub/b.ts", "typescript");
        assert_eq!(node.label, "b.ts");
        assert_eq!(node.id, "src/sub/b.ts");
    }

    #[test]
    fn root_directory_label() {
        let node = FileNode::directory(ROOT_DIRECTORY);
        assert_eq!(node.label, ".");
        assert!(node.is_directory());
    }
}
