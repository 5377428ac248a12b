//! # repograph-analysis
//!
//! Multi-language static analysis that turns an in-memory map of repository
//! files into a file graph and a function graph.
//!
//! The crate never touches the filesystem. Callers supply `path -> content`
//! pairs (repository-relative, `/`-separated) and an optional path-alias table,
//! and get back an immutable [`AnalysisResult`].
//!
//! ## Pipeline
//!
//! ```text
//! FileMap ──► language::detect ──► Extractor (OXC AST | pattern rules)
//!                                        │   parallel, bounded (walker)
//!                                        ▼
//!                              GraphAssembler
//!                  resolve imports (ModuleResolver) ─► file edges
//!                  export index ─► call edges ─► nodes ─► warnings
//!                                        │
//!                                        ▼
//!                        Enricher (optional LLM pass, best effort)
//!                                        │
//!                                        ▼
//!                                 AnalysisResult
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repograph_analysis::{Analyzer, FileMap};
//!
//! # async fn example() -> repograph_analysis::Result<()> {
//! let mut files = FileMap::new();
//! files.insert("src/util.ts".into(), "export function helper() {}".into());
//! files.insert("src/main.ts".into(), "import { helper } from './util';\nhelper();".into());
//!
//! let result = Analyzer::new().files(files).llm_enabled(false).analyze().await?;
//! assert_eq!(result.function_graph.edges.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Degraded conditions (parse failures, unresolved imports, enrichment
//! failures) are reported as strings in [`AnalysisResult::warnings`]. Only
//! invalid caller input produces an [`AnalyzeError`].

pub mod analyzer;
mod assembler;
pub mod config;
pub mod enrich;
pub mod extractors;
pub mod language;
pub mod resolver;
pub mod result;
mod walker;

pub use analyzer::{Analyzer, Configured, Unconfigured, analyze};
pub use config::{AnalyzerConfig, FileMap, Progress, ProgressFn};
pub use enrich::{AnthropicService, CompletionRequest, LlmConfig, LlmError, LlmService};
pub use extractors::{ExtractError, Extractor, ExtractorRegistry, FileExtraction};
pub use language::{ExtractorChoice, Language, detect};
pub use resolver::{AliasEntry, ModuleResolver};
pub use result::AnalysisResult;

pub use repograph_graph as graph;

/// Errors surfaced by [`Analyzer::analyze`].
///
/// Every other failure mode of the pipeline is recovered and reported as a
/// warning on the result.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid file path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("failed to start extraction workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
