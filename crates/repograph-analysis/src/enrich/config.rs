//! Configuration for the enrichment pass.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Settings for the single enrichment round-trip of a run.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on the response size.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Runs with fewer extracted files skip enrichment.
    #[serde(default = "default_min_files")]
    pub min_files: usize,

    /// Digests sent per request.
    #[serde(default = "default_max_files_per_request")]
    pub max_files_per_request: usize,

    /// Characters of each file included in its digest.
    #[serde(default = "default_digest_preview_chars")]
    pub digest_preview_chars: usize,

    /// API credential. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout() -> u64 {
    60
}

fn default_min_files() -> usize {
    3
}

fn default_max_files_per_request() -> usize {
    40
}

fn default_digest_preview_chars() -> usize {
    1200
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
            min_files: default_min_files(),
            max_files_per_request: default_max_files_per_request(),
            digest_preview_chars: default_digest_preview_chars(),
            api_key: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("min_files", &self.min_files)
            .field("max_files_per_request", &self.max_files_per_request)
            .field("digest_preview_chars", &self.digest_preview_chars)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl LlmConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Non-empty API key, if one is configured.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model name cannot be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than 0".to_string());
        }
        if self.max_files_per_request == 0 {
            return Err("max_files_per_request must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_key() {
        let config = LlmConfig::default().with_api_key("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: LlmConfig = serde_json::from_str(r#"{"minFiles": 10}"#).unwrap();
        assert_eq!(config.min_files, 10);
        assert_eq!(config.max_files_per_request, 40);
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert!(config.credential().is_none());
    }

    #[test]
    fn blank_keys_are_not_credentials() {
        assert!(LlmConfig::default().with_api_key("  ").credential().is_none());
    }
}
