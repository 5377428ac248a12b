//! Error types for the CLI.
//!
//! Commands return [`CliError`]; `main` converts it into a miette report
//! with a hint where one is useful.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

use repograph_analysis::AnalyzeError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to read path aliases from {}: {reason}", .path.display())]
    Aliases { path: PathBuf, reason: String },

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalyzeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::RootNotFound(path) => miette::miette!(
            "Repository root not found: {}\n\nHint: pass an existing directory to `repograph analyze`",
            path.display()
        ),
        CliError::Config(message) => miette::miette!(
            "Configuration error: {}\n\nHint: check repograph.json and REPOGRAPH_* variables",
            message
        ),
        CliError::Aliases { path, reason } => miette::miette!(
            "Failed to read path aliases from {}: {}\n\nHint: fix the file or pass --tsconfig",
            path.display(),
            reason
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_are_attached() {
        let report = cli_error_to_miette(CliError::RootNotFound(PathBuf::from("nope")));
        let text = report.to_string();
        assert!(text.contains("nope"));
        assert!(text.contains("Hint"));
    }

    #[test]
    fn context_chain_is_shown() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError = anyhow::Error::new(source).context("Failed to write out.json").into();
        assert_eq!(err.to_string(), "Failed to write out.json: denied");
    }

    #[test]
    fn analysis_errors_convert() {
        let err: CliError = AnalyzeError::InvalidConfig("concurrency must be at least 1".into()).into();
        assert!(err.to_string().contains("concurrency"));
    }
}
