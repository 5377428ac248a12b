use serde::{Deserialize, Serialize};

use crate::SourceSpan;

/// Display name of the synthetic record that owns top-level call sites.
pub const MODULE_RECORD_NAME: &str = "<module>";

/// Syntactic origin of a [`FunctionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    Function,
    Arrow,
    Method,
    Class,
    Anonymous,
    /// Pseudo-record for code that runs at module top level.
    Module,
}

/// A declared function, class, or method in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    /// Globally unique id: `"{file_path}::{local_id}"`.
    pub id: String,
    pub display_name: String,
    pub file_path: String,
    pub kind: FunctionKind,
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_as: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_span: Option<SourceSpan>,
    /// Whether this record is materialized as a graph node.
    pub include: bool,
}

impl FunctionRecord {
    pub fn new(
        file_path: impl Into<String>,
        local_id: &str,
        display_name: impl Into<String>,
        kind: FunctionKind,
    ) -> Self {
        let file_path = file_path.into();
        Self {
            id: record_id(&file_path, local_id),
            display_name: display_name.into(),
            file_path,
            kind,
            is_exported: false,
            exported_as: None,
            source_span: None,
            include: false,
        }
    }

    /// The pseudo-record for top-level code of `file_path`.
    pub fn module(file_path: impl Into<String>) -> Self {
        Self::new(
            file_path,
            MODULE_RECORD_NAME,
            MODULE_RECORD_NAME,
            FunctionKind::Module,
        )
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }

    /// Mark as exported under `name`. Exported records are always included.
    pub fn mark_exported(&mut self, name: impl Into<String>) {
        self.is_exported = true;
        self.exported_as = Some(name.into());
        self.include = true;
    }

    pub fn is_module(&self) -> bool {
        self.kind == FunctionKind::Module
    }
}

/// Build a record id from a file path and a file-local identifier.
pub fn record_id(file_path: &str, local_id: &str) -> String {
    format!("{file_path}::{local_id}")
}

/// A call from one record to a name bound by an import of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSite {
    /// Id of the calling [`FunctionRecord`] (possibly the module record).
    pub caller_id: String,
    pub callee_local_name: String,
    /// Name the callee was imported as; for `ns.fn()` this is `fn`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callee_imported_name: Option<String>,
    /// Set when the call went through a namespace object (`ns.fn()`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_specifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_target_file: Option<String>,
}

impl CallSite {
    pub fn new(caller_id: impl Into<String>, callee_local_name: impl Into<String>) -> Self {
        Self {
            caller_id: caller_id.into(),
            callee_local_name: callee_local_name.into(),
            callee_imported_name: None,
            member_name: None,
            source_specifier: None,
            resolved_target_file: None,
        }
    }

    pub fn is_namespace_call(&self) -> bool {
        self.member_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_path_qualified() {
        let record = FunctionRecord::new("src/util.ts", "helper", "helper", FunctionKind::Function);
        assert_eq!(record.id, "src/util.ts::helper");
        assert!(!record.include);
    }

    #[test]
    fn exporting_forces_inclusion() {
        let mut record = FunctionRecord::new("a.ts", "anonymous_1", "anonymous_1", FunctionKind::Arrow);
        record.mark_exported("default");
        assert!(record.include);
        assert_eq!(record.exported_as.as_deref(), Some("default"));
    }

    #[test]
    fn module_record_is_unique_per_file() {
        let a = FunctionRecord::module("a.ts");
        let b = FunctionRecord::module("b.ts");
        assert_ne!(a.id, b.id);
        assert!(a.is_module());
    }
}
