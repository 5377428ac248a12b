//! Optional language-model enrichment of the deterministic graphs.
//!
//! One request per run: the files most in need of help are digested, sent
//! with a schema-constrained prompt, and any edges the model proposes between
//! existing nodes are merged back without touching static edges. Every
//! failure here degrades to a warning.
//!
//! ```text
//! Assembly ─► build_digests ─► PromptBuilder ─► LlmService::complete
//!                                                     │ (timeout)
//!                                                     ▼
//!                      merge_edges ◄─ parse_suggestions
//! ```

mod client;
mod config;
mod digest;
mod error;
mod merge;
mod parse;
mod prompts;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use client::{AnthropicService, CompletionRequest, LlmService};
pub use config::{DEFAULT_ENDPOINT, LlmConfig};
pub use digest::{FileDigest, ImportDigest};
pub use error::LlmError;
pub use merge::merge_edges;
pub use parse::{LlmSuggestions, SuggestedEdge, parse_suggestions};
pub use prompts::PromptBuilder;

use crate::assembler::Assembly;
use digest::build_digests;

pub(crate) const MISSING_CREDENTIAL_WARNING: &str =
    "LLM enrichment skipped: no API credential configured";

/// What enrichment added to a run.
#[derive(Debug, Default)]
pub(crate) struct Enrichment {
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
    pub edges_added: usize,
}

/// Run the enrichment pass over `assembly`, mutating its graphs in place.
pub(crate) async fn enrich(
    assembly: &mut Assembly,
    config: &LlmConfig,
    service: Option<Arc<dyn LlmService>>,
) -> Enrichment {
    let mut outcome = Enrichment::default();

    let Some(service) = service else {
        info!("no LLM credential configured, skipping enrichment");
        outcome.warnings.push(MISSING_CREDENTIAL_WARNING.to_string());
        return outcome;
    };

    if assembly.files.len() < config.min_files {
        debug!(
            files = assembly.files.len(),
            min_files = config.min_files,
            "too few files for enrichment"
        );
        return outcome;
    }

    if let Err(message) = config.validate() {
        outcome
            .warnings
            .push(format!("LLM enrichment skipped: invalid configuration: {message}"));
        return outcome;
    }

    let digests = build_digests(
        &assembly.files,
        config.max_files_per_request,
        config.digest_preview_chars,
    );
    let request = CompletionRequest {
        model: config.model.clone(),
        system: PromptBuilder::system_prompt().to_string(),
        prompt: PromptBuilder::build_prompt(&digests),
        max_tokens: config.max_tokens,
    };
    debug!(files = digests.len(), model = %request.model, "requesting enrichment");

    let response = match tokio::time::timeout(config.timeout(), service.complete(&request)).await
    {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            warn!(error = %err, "enrichment request failed");
            outcome.warnings.push(format!("LLM enrichment failed: {err}"));
            return outcome;
        }
        Err(_) => {
            let err = LlmError::Timeout {
                seconds: config.timeout_seconds,
            };
            warn!(error = %err, "enrichment request timed out");
            outcome.warnings.push(format!("LLM enrichment failed: {err}"));
            return outcome;
        }
    };

    let Some(suggestions) = parse_suggestions(&response) else {
        let err = LlmError::MalformedResponse("response did not contain valid JSON".to_string());
        warn!(error = %err, "discarding enrichment response");
        outcome.warnings.push(format!("LLM enrichment failed: {err}"));
        return outcome;
    };

    let file_edges = merge_edges(&mut assembly.file_graph, &suggestions.file_edges);
    let function_edges = merge_edges(&mut assembly.function_graph, &suggestions.function_edges);
    outcome.edges_added = file_edges + function_edges;
    outcome.notes = suggestions.notes;

    info!(
        file_edges,
        function_edges,
        notes = outcome.notes.len(),
        "merged enrichment suggestions"
    );
    outcome
}
