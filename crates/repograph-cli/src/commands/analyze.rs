use std::path::Path;

use anyhow::Context;
use console::style;
use tokio::fs;
use tracing::debug;

use repograph_analysis::{AnalysisResult, Analyzer};

use crate::aliases;
use crate::cli::AnalyzeArgs;
use crate::config::RepographConfig;
use crate::error::{CliError, Result};
use crate::provider::{self, ProviderOptions};
use crate::ui;

/// Analyze a repository directory and report or write the graphs.
pub async fn execute(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    if !args.root.is_dir() {
        return Err(CliError::RootNotFound(args.root.clone()));
    }
    let config = RepographConfig::load(&args)?;
    let root = args.root.as_path();

    let collected = provider::collect(
        root,
        ProviderOptions {
            max_file_size: config.max_file_size,
            limit: Some(config.max_files),
        },
    )?;
    let aliases = aliases::load(root, config.tsconfig_path(root).as_deref())?;
    debug!(
        fingerprint = %AnalysisResult::fingerprint(&collected.files),
        aliases = aliases.len(),
        "inputs loaded"
    );

    let progress = ui::AnalysisProgress::new(ui::is_interactive(quiet));
    let analysis = Analyzer::new()
        .files(collected.files)
        .aliases(aliases)
        .max_files(Some(config.max_files))
        .concurrency(config.concurrency)
        .llm_enabled(config.llm_enabled)
        .llm(config.llm_config())
        .on_progress(progress.callback())
        .analyze()
        .await;
    progress.finish();

    let mut result = analysis?;
    result.stats.skipped_file_count += collected.skipped;

    if !quiet {
        report(&result, collected.truncated, config.max_files);
    }

    match args.json.as_deref() {
        Some(path) if path == Path::new("-") => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(path) => {
            write_json(path, &result).await?;
            if !quiet {
                ui::success(&format!("Wrote graph JSON to {}", style(path.display()).bold()));
            }
        }
        None => {}
    }

    Ok(())
}

fn report(result: &AnalysisResult, truncated: bool, max_files: usize) {
    ui::print_summary(result);
    if truncated {
        ui::info(&format!("Stopped after {max_files} files (max_files)"));
    }
    for warning in &result.warnings {
        ui::warning(warning);
    }
    for note in &result.notes {
        ui::info(note);
    }
}

async fn write_json(path: &Path, result: &AnalysisResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize analysis")?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, json.into_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
