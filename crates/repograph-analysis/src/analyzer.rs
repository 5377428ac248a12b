//! Pipeline entry point.
//!
//! The Analyzer runs extraction, resolution, call-edge derivation and the
//! optional enrichment pass over an in-memory file map and returns an
//! immutable [`AnalysisResult`].

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use tokio::task;
use tracing::{Instrument, Span, debug, debug_span, info, info_span};

use crate::assembler::{Assembly, assemble};
use crate::config::{AnalyzerConfig, FileMap, Progress, ProgressFn, validate_path};
use crate::enrich::{self, AnthropicService, LlmConfig, LlmService};
use crate::extractors::ExtractorRegistry;
use crate::resolver::{AliasEntry, ModuleResolver};
use crate::result::AnalysisResult;
use crate::walker::walk;
use crate::{AnalyzeError, Result};

/// Typestate marker for an analyzer without input files.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured;

/// Typestate marker for an analyzer that has its file map.
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Builder and runner for one analysis.
///
/// `analyze()` is only available once a file map has been supplied.
///
/// # Example
///
/// ```rust,no_run
/// use repograph_analysis::{AliasEntry, Analyzer, FileMap};
///
/// # async fn example(files: FileMap) -> repograph_analysis::Result<()> {
/// let result = Analyzer::new()
///     .files(files)
///     .aliases(vec![AliasEntry::from_pattern("@/*", ["src/*"])])
///     .max_files(Some(2000))
///     .concurrency(4)
///     .analyze()
///     .await?;
///
/// println!("{}", result);
/// # Ok(())
/// # }
/// ```
pub struct Analyzer<State = Unconfigured> {
    config: AnalyzerConfig,
    files: FileMap,
    registry: Option<ExtractorRegistry>,
    llm_service: Option<Arc<dyn LlmService>>,
    _state: PhantomData<State>,
}

impl Default for Analyzer<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer<Unconfigured> {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            files: FileMap::new(),
            registry: None,
            llm_service: None,
            _state: PhantomData,
        }
    }
}

impl<State> Analyzer<State> {
    /// Supply the repository files, keyed by repository-relative path.
    pub fn files(self, files: FileMap) -> Analyzer<Configured> {
        Analyzer {
            config: self.config,
            files,
            registry: self.registry,
            llm_service: self.llm_service,
            _state: PhantomData,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn aliases(mut self, aliases: Vec<AliasEntry>) -> Self {
        self.config.aliases = aliases;
        self
    }

    /// Cap on files considered, in map order. `None` disables the cap.
    pub fn max_files(mut self, max_files: Option<usize>) -> Self {
        self.config.max_files = max_files;
        self
    }

    pub fn concurrency(mut self, workers: usize) -> Self {
        self.config.concurrency = workers;
        self
    }

    pub fn llm_enabled(mut self, enabled: bool) -> Self {
        self.config.llm_enabled = enabled;
        self
    }

    pub fn llm(mut self, llm: LlmConfig) -> Self {
        self.config.llm = llm;
        self
    }

    /// Use `service` for enrichment instead of the configured HTTP endpoint.
    pub fn llm_service(mut self, service: Arc<dyn LlmService>) -> Self {
        self.llm_service = Some(service);
        self
    }

    /// Use a custom extractor registry.
    pub fn registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn on_progress(mut self, callback: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        let callback: ProgressFn = Arc::new(callback);
        self.config.on_progress = Some(callback);
        self
    }
}

impl Analyzer<Configured> {
    /// Run the full pipeline, including enrichment when enabled.
    ///
    /// Extraction and assembly run on the blocking pool so the calling
    /// runtime keeps serving other tasks.
    pub async fn analyze(self) -> Result<AnalysisResult> {
        let started = Instant::now();
        let Self {
            config,
            files,
            registry,
            llm_service,
            ..
        } = self;

        let span = Span::current();
        let (config, mut assembly) = task::spawn_blocking(move || {
            let assembly = span.in_scope(|| build_assembly(&config, &files, registry.as_ref()))?;
            Ok::<_, AnalyzeError>((config, assembly))
        })
        .await??;

        let mut notes = Vec::new();
        if config.llm_enabled {
            let service = llm_service.or_else(|| {
                AnthropicService::from_config(&config.llm)
                    .map(|s| Arc::new(s) as Arc<dyn LlmService>)
            });
            let outcome = enrich::enrich(&mut assembly, &config.llm, service)
                .instrument(info_span!("enrich"))
                .await;
            assembly.warnings.extend(outcome.warnings);
            assembly.stats.llm_edge_count = outcome.edges_added;
            notes = outcome.notes;
        } else {
            debug!("enrichment disabled");
        }

        Ok(finish(assembly, notes, started))
    }

    /// Run the deterministic pipeline only, on the calling thread.
    pub fn analyze_static(self) -> Result<AnalysisResult> {
        let started = Instant::now();
        let assembly = build_assembly(&self.config, &self.files, self.registry.as_ref())?;
        Ok(finish(assembly, Vec::new(), started))
    }
}

fn build_assembly(
    config: &AnalyzerConfig,
    files: &FileMap,
    registry: Option<&ExtractorRegistry>,
) -> Result<Assembly> {
    config.validate()?;
    for path in files.keys() {
        validate_path(path)?;
    }

    let limit = config.max_files.unwrap_or(usize::MAX);
    if files.len() > limit {
        info!(
            total = files.len(),
            limit,
            "file limit reached, ignoring the remainder"
        );
    }
    let selected: Vec<(&str, &str)> = files
        .iter()
        .take(limit)
        .map(|(path, content)| (path.as_str(), content.as_str()))
        .collect();

    let registry = match registry {
        Some(registry) => registry.clone(),
        None => ExtractorRegistry::standard(config.preview_chars),
    };

    let walked = debug_span!("extract", files = selected.len()).in_scope(|| {
        walk(
            &selected,
            &registry,
            config.concurrency,
            config.on_progress.clone(),
        )
    })?;

    let resolver = ModuleResolver::new(
        selected.iter().map(|(path, _)| *path),
        config.aliases.clone(),
    );
    Ok(debug_span!("assemble").in_scope(|| assemble(walked, &resolver)))
}

/// One-shot form of the builder: analyze `files` with `aliases` and the
/// remaining options from `config`.
pub async fn analyze(
    files: FileMap,
    aliases: Vec<AliasEntry>,
    config: AnalyzerConfig,
) -> Result<AnalysisResult> {
    Analyzer::new()
        .config(config)
        .aliases(aliases)
        .files(files)
        .analyze()
        .await
}

fn finish(mut assembly: Assembly, notes: Vec<String>, started: Instant) -> AnalysisResult {
    assembly.stats.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    assembly.stats.file_edge_count = assembly.file_graph.edges.len();
    assembly.stats.function_edge_count = assembly.function_graph.edges.len();
    let stats = &assembly.stats;
    info!(
        files = stats.file_count,
        directories = stats.directory_count,
        functions = stats.function_count,
        file_edges = stats.file_edge_count,
        function_edges = stats.function_edge_count,
        warnings = assembly.warnings.len(),
        duration_ms = stats.duration_ms,
        "analysis complete"
    );

    AnalysisResult {
        file_graph: assembly.file_graph,
        function_graph: assembly.function_graph,
        warnings: assembly.warnings,
        stats: assembly.stats,
        notes,
    }
}
