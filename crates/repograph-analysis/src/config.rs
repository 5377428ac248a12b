//! Configuration types for the analysis pipeline.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::enrich::LlmConfig;
use crate::resolver::AliasEntry;
use crate::{AnalyzeError, Result};

/// Repository-relative path to file content, in discovery order.
pub type FileMap = IndexMap<String, String>;

/// Default cap on the number of files considered per run.
pub const DEFAULT_MAX_FILES: usize = 5000;

/// Default number of extraction workers.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Characters of each file kept for enrichment digests.
pub const DEFAULT_PREVIEW_CHARS: usize = 4000;

/// Minimum interval between two progress notifications.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// A progress notification is always sent after this many files.
pub const PROGRESS_EVERY_FILES: usize = 50;

/// Snapshot of extraction progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} files analyzed", self.completed, self.total)
    }
}

/// Observational progress callback. Must not block.
pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

/// Options for one analysis run.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Files beyond the first `max_files` (in discovery order) are ignored.
    ///
    /// `None` disables the cap.
    pub max_files: Option<usize>,

    /// Number of parallel extraction workers.
    pub concurrency: usize,

    /// Path-alias table consumed by the module resolver.
    pub aliases: Vec<AliasEntry>,

    /// Characters of each file retained as a preview.
    pub preview_chars: usize,

    /// Whether the enrichment pass runs at all.
    pub llm_enabled: bool,

    pub llm: LlmConfig,

    pub on_progress: Option<ProgressFn>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_files: Some(DEFAULT_MAX_FILES),
            concurrency: DEFAULT_CONCURRENCY,
            aliases: Vec::new(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            llm_enabled: true,
            llm: LlmConfig::default(),
            on_progress: None,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("max_files", &self.max_files)
            .field("concurrency", &self.concurrency)
            .field("aliases", &self.aliases.len())
            .field("preview_chars", &self.preview_chars)
            .field("llm_enabled", &self.llm_enabled)
            .field("llm", &self.llm)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl AnalyzerConfig {
    /// Reject settings that cannot describe a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == Some(0) {
            return Err(AnalyzeError::InvalidConfig(
                "max_files must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(AnalyzeError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check that a map key is a repository-relative posix path.
pub fn validate_path(path: &str) -> Result<()> {
    let reason = if path.is_empty() {
        Some("path is empty")
    } else if path.starts_with('/') {
        Some("path must be relative to the repository root")
    } else if path.contains('\\') {
        Some("path must use '/' separators")
    } else if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        Some("path must be normalized")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AnalyzeError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_files, Some(5000));
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = AnalyzerConfig {
            max_files: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalyzeError::InvalidConfig(_))));

        let config = AnalyzerConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn path_validation() {
        assert!(validate_path("src/a.ts").is_ok());
        assert!(validate_path(".eslintrc.js").is_ok());
        assert!(validate_path("./src/a.ts").is_err());
        assert!(validate_path("/src/a.ts").is_err());
        assert!(validate_path("src//a.ts").is_err());
        assert!(validate_path("src/../a.ts").is_err());
        assert!(validate_path("src\\a.ts").is_err());
    }
}
