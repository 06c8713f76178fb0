//! Instruction corpus source.
//!
//! The corpus is a plain-text numbered instruction list. A default set of
//! Node-ecosystem instructions ships inside the binary; a config path
//! swaps in a user-maintained file.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Instructions compiled into the binary, used when no corpus path is
/// configured.
const DEFAULT_CORPUS: &str = include_str!("../../assets/default_instructions.txt");

/// Errors while reading a configured corpus file
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the instruction corpus text comes from.
pub struct CorpusSource {
    path: Option<PathBuf>,
}

impl CorpusSource {
    /// Use the embedded default corpus.
    pub fn embedded() -> Self {
        Self { path: None }
    }

    /// Read the corpus from a file instead.
    pub fn from_file(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Build from the optional config path.
    pub fn from_config(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Read the raw corpus text.
    pub fn load(&self) -> Result<String, CorpusError> {
        match &self.path {
            Some(path) => {
                info!("Loading instruction corpus from {}", path.display());
                std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
                    path: path.clone(),
                    source,
                })
            }
            None => {
                debug!("Using embedded instruction corpus");
                Ok(DEFAULT_CORPUS.to_string())
            }
        }
    }
}
