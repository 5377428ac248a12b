//! Layered CLI configuration.
//!
//! Priority, lowest first: built-in defaults, `repograph.json` in the
//! repository root (or `--config`), `REPOGRAPH_*` environment variables,
//! command-line flags.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::{Deserialize, Serialize};

use repograph_analysis::LlmConfig;
use repograph_analysis::config::{DEFAULT_CONCURRENCY, DEFAULT_MAX_FILES};

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};

pub const CONFIG_FILE_NAME: &str = "repograph.json";

/// Fallback variable for the enrichment API key.
pub const FALLBACK_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Files larger than this are not read.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepographConfig {
    pub max_files: usize,
    pub concurrency: usize,
    pub max_file_size: u64,
    pub llm_enabled: bool,
    pub llm_model: String,
    pub llm_endpoint: String,
    pub llm_timeout_seconds: u64,
    pub llm_min_files: usize,
    pub llm_max_files_per_request: usize,
    /// Read from `REPOGRAPH_LLM_API_KEY`; never written back out.
    #[serde(default, skip_serializing)]
    pub llm_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,
}

impl Default for RepographConfig {
    fn default() -> Self {
        let llm = LlmConfig::default();
        Self {
            max_files: DEFAULT_MAX_FILES,
            concurrency: DEFAULT_CONCURRENCY,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            llm_enabled: true,
            llm_model: llm.model,
            llm_endpoint: llm.endpoint,
            llm_timeout_seconds: llm.timeout_seconds,
            llm_min_files: llm.min_files,
            llm_max_files_per_request: llm.max_files_per_request,
            llm_api_key: None,
            tsconfig: None,
        }
    }
}

/// Flag values that override every other layer when present.
#[derive(Debug, Default, Serialize)]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_files: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    llm_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsconfig: Option<PathBuf>,
}

impl From<&AnalyzeArgs> for FlagOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            max_files: args.max_files,
            concurrency: args.concurrency,
            llm_enabled: args.no_llm.then_some(false),
            tsconfig: args.tsconfig.clone(),
        }
    }
}

impl RepographConfig {
    /// Load the configuration for an `analyze` run.
    pub fn load(args: &AnalyzeArgs) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(CliError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = args.root.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = &config_file {
            figment = figment.merge(Json::file(path));
        }
        figment = figment
            .merge(Env::prefixed("REPOGRAPH_"))
            .merge(Serialized::defaults(FlagOverrides::from(args)));

        let mut config: Self = figment
            .extract()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if config.llm_api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            config.llm_api_key = std::env::var(FALLBACK_API_KEY_VAR).ok();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(CliError::Config("max_files must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(CliError::Config("concurrency must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Enrichment settings for the analysis library.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.llm_model.clone(),
            endpoint: self.llm_endpoint.clone(),
            timeout_seconds: self.llm_timeout_seconds,
            min_files: self.llm_min_files,
            max_files_per_request: self.llm_max_files_per_request,
            api_key: self.llm_api_key.clone(),
            ..LlmConfig::default()
        }
    }

    /// The tsconfig path resolved against `root` when relative.
    pub fn tsconfig_path(&self, root: &Path) -> Option<PathBuf> {
        self.tsconfig.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn args(root: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            root: root.to_path_buf(),
            json: None,
            max_files: None,
            concurrency: None,
            no_llm: false,
            tsconfig: None,
            config: None,
        }
    }

    #[test]
    fn defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = RepographConfig::load(&args(temp.path())).unwrap();
        assert_eq!(config.max_files, DEFAULT_MAX_FILES);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert!(config.llm_enabled);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn file_then_flags() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "max_files": 12, "concurrency": 2, "llm_model": "claude-custom" }"#,
        )
        .unwrap();

        let mut flags = args(temp.path());
        flags.concurrency = Some(6);
        flags.no_llm = true;

        let config = RepographConfig::load(&flags).unwrap();
        assert_eq!(config.max_files, 12);
        assert_eq!(config.concurrency, 6);
        assert!(!config.llm_enabled);
        assert_eq!(config.llm_config().model, "claude-custom");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), r#"{ "max_files": 0 }"#).unwrap();
        assert!(matches!(
            RepographConfig::load(&args(temp.path())),
            Err(CliError::Config(_))
        ));

        let mut missing = args(temp.path());
        missing.config = Some(temp.path().join("absent.json"));
        assert!(RepographConfig::load(&missing).is_err());
    }

    #[test]
    fn api_key_is_not_serialized() {
        let config = RepographConfig {
            llm_api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
