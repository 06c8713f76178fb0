//! Configuration file loading and validation

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, CorpusSection, ExecutionSection, FileConfig, ModelSection,
    RetrievalSection,
};
pub use loader::ConfigLoader;
