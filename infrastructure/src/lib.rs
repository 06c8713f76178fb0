//! Infrastructure layer for bootsmith
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenAI-compatible chat and embeddings clients,
//! the local tool executor, the instruction corpus source, configuration
//! file loading, and the JSONL run logger.

pub mod config;
pub mod corpus;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, CorpusSection, ExecutionSection, FileConfig,
    ModelSection, RetrievalSection,
};
pub use corpus::{CorpusError, CorpusSource};
pub use logging::JsonlConversationLogger;
pub use providers::openai::{OpenAiEmbeddings, OpenAiGateway};
pub use tools::{LocalToolExecutor, bootstrap_registry, registry_schemas};
