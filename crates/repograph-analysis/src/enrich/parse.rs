//! Tolerant parsing of model responses.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("static regex"));

static MISSING_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([}\]"]|\d|true|false|null)[ \t\r]*\n(\s*)(["{\[])"#).expect("static regex")
});

/// One relationship proposed by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedEdge {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub confidence: Option<String>,
    pub reason: Option<String>,
}

/// Parsed enrichment response. Missing sections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSuggestions {
    pub file_edges: Vec<SuggestedEdge>,
    pub function_edges: Vec<SuggestedEdge>,
    pub notes: Vec<String>,
}

impl LlmSuggestions {
    pub fn is_empty(&self) -> bool {
        self.file_edges.is_empty() && self.function_edges.is_empty() && self.notes.is_empty()
    }
}

/// Parse a raw model response, repairing common JSON damage.
///
/// Returns `None` when nothing usable can be recovered.
pub fn parse_suggestions(text: &str) -> Option<LlmSuggestions> {
    let unfenced = strip_fences(text);
    let cleaned = strip_control_chars(unfenced);
    let candidate = outermost_object(&cleaned)?;

    if let Ok(parsed) = serde_json::from_str::<LlmSuggestions>(candidate) {
        return Some(parsed);
    }

    let repaired = repair(candidate);
    match serde_json::from_str::<LlmSuggestions>(&repaired) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(error = %err, "enrichment response is not valid JSON after repair");
            None
        }
    }
}

/// Content of the first markdown code fence, or the whole text.
fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(start) = text.find("```") else {
        return text;
    };
    let after_ticks = &text[start + 3..];
    // Skip the info string (`json`, `JSON`, ...).
    let body = match after_ticks.find('\n') {
        Some(newline) => &after_ticks[newline + 1..],
        None => after_ticks,
    };
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn repair(text: &str) -> String {
    let without_trailing = TRAILING_COMMA.replace_all(text, "$1");
    MISSING_COMMA
        .replace_all(&without_trailing, "$1,\n$2$3")
        .into_owned()
}
