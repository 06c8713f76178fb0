//! Configuration file format (`bootsmith.toml`).
//!
//! Every field has a serde default so a partial file (or none at all)
//! still produces a usable configuration. Sections map one-to-one onto
//! the adapters they configure.

use bootsmith_domain::RetrievalConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from [`FileConfig::validate`].
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("model.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("execution.temperature must be within [0.0, 2.0], got {0}")]
    InvalidTemperature(f32),

    #[error("execution.max_turns must be at least 1")]
    ZeroMaxTurns,

    #[error("retrieval config invalid: {0}")]
    InvalidRetrieval(String),
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub model: ModelSection,

    #[serde(default)]
    pub retrieval: RetrievalSection,

    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub corpus: CorpusSection,
}

impl FileConfig {
    /// Validate cross-field constraints after merging all sources.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(0.0..=2.0).contains(&self.execution.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.execution.temperature,
            ));
        }
        if self.execution.max_turns == 0 {
            return Err(ConfigValidationError::ZeroMaxTurns);
        }
        self.retrieval
            .to_retrieval_config()
            .validate()
            .map_err(ConfigValidationError::InvalidRetrieval)?;
        Ok(())
    }
}

/// `[model]` — provider endpoint and model names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model used for planning and step execution.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used to embed the instruction corpus and queries.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

impl ModelSection {
    /// The API key from config, or the `OPENAI_API_KEY` environment
    /// variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

/// `[retrieval]` — adaptive threshold retrieval knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalSection {
    #[serde(default = "default_min_similarity_score")]
    pub min_similarity_score: f32,

    #[serde(default = "default_max_k")]
    pub max_k: usize,

    #[serde(default = "default_k_increment")]
    pub k_increment: usize,
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            min_similarity_score: default_min_similarity_score(),
            max_k: default_max_k(),
            k_increment: default_k_increment(),
        }
    }
}

impl RetrievalSection {
    pub fn to_retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig {
            min_similarity_score: self.min_similarity_score,
            max_k: self.max_k,
            k_increment: self.k_increment,
        }
    }
}

fn default_min_similarity_score() -> f32 {
    0.5
}

fn default_max_k() -> usize {
    4
}

fn default_k_increment() -> usize {
    2
}

/// `[execution]` — orchestration loop knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionSection {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Model invocations allowed per step before the step is abandoned.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Where to write the JSONL run transcript; unset disables it.
    #[serde(default)]
    pub conversation_log: Option<PathBuf>,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_turns: default_max_turns(),
            conversation_log: None,
        }
    }
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_turns() -> usize {
    12
}

/// `[corpus]` — instruction corpus source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusSection {
    /// Path to a numbered instruction file; unset uses the embedded
    /// default corpus.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
