//! Configuration system for RAGOps.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment.
//! CLI flags are applied on top by the binary, which validates the merged result.
//! Configuration is loaded from `~/.config/ragops/config.toml` and/or `ragops.toml`
//! in the workspace directory. Relative paths in the loaded configuration are
//! resolved against the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the workspace-level config file.
pub const WORKSPACE_CONFIG_FILE: &str = "ragops.toml";

/// Top-level evaluation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Dataset file replacing the built-in corpus and questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,
    /// Directory that receives the markdown report.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    /// Seed for synthetic latency/cost sampling.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of contexts retrieved per question.
    #[serde(default = "default_retrieval_width")]
    pub retrieval_width: usize,
    /// Synthetic instrumentation parameters.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            reports_dir: default_reports_dir(),
            seed: default_seed(),
            retrieval_width: default_retrieval_width(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EvalConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval_width == 0 {
            return Err(ConfigError::Invalid {
                key: "retrieval_width",
                message: "must be at least 1".into(),
            });
        }
        self.telemetry.validate()
    }

    /// Anchor relative `reports_dir` and `corpus_path` at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.reports_dir.is_relative() {
            self.reports_dir = base.join(&self.reports_dir);
        }
        if let Some(corpus) = self.corpus_path.as_mut().filter(|p| p.is_relative()) {
            *corpus = base.join(&*corpus);
        }
    }
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_seed() -> u64 {
    42
}

fn default_retrieval_width() -> usize {
    3
}

/// Parameters of the synthetic latency/cost model.
///
/// `latency = base + per_token * tokens + U[0, jitter]`, `cost = cost_per_token * tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_base_latency")]
    pub base_latency_ms: f64,
    #[serde(default = "default_per_token_latency")]
    pub per_token_latency_ms: f64,
    #[serde(default = "default_jitter")]
    pub jitter_ms: u64,
    #[serde(default = "default_cost_per_token")]
    pub cost_per_token_usd: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            base_latency_ms: default_base_latency(),
            per_token_latency_ms: default_per_token_latency(),
            jitter_ms: default_jitter(),
            cost_per_token_usd: default_cost_per_token(),
        }
    }
}

impl TelemetryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("telemetry.base_latency_ms", self.base_latency_ms),
            ("telemetry.per_token_latency_ms", self.per_token_latency_ms),
            ("telemetry.cost_per_token_usd", self.cost_per_token_usd),
        ];
        for (key, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    message: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

fn default_base_latency() -> f64 {
    50.0
}

fn default_per_token_latency() -> f64 {
    2.0
}

fn default_jitter() -> u64 {
    20
}

fn default_cost_per_token() -> f64 {
    0.00001
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `RAGOPS_`, `__` for nesting)
/// 2. Explicit config file, or else workspace-local `ragops.toml`
/// 3. User config (`~/.config/ragops/config.toml`)
/// 4. Built-in defaults
///
/// The result is not validated here: callers layer their own overrides on top
/// and then call [`EvalConfig::validate`].
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
) -> Result<EvalConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(EvalConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match config_file {
        // An explicit file must exist; figment silently skips missing files.
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Invalid {
                    key: "config",
                    message: format!("file not found: {}", path.display()),
                });
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(ws) = workspace {
                let ws_config = ws.join(WORKSPACE_CONFIG_FILE);
                if ws_config.exists() {
                    figment = figment.merge(Toml::file(&ws_config));
                }
            }
        }
    }

    // RAGOPS_SEED, RAGOPS_TELEMETRY__JITTER_MS, etc.
    figment = figment.merge(Env::prefixed("RAGOPS_").split("__"));

    let mut config: EvalConfig = figment.extract().map_err(Box::new)?;
    if let Some(ws) = workspace {
        config.resolve_paths(ws);
    }
    Ok(config)
}

/// Path of the user-level config file, if a home directory can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "ragops", "ragops")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
