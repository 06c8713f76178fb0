//! OpenAI-compatible API adapters.
//!
//! Two independent clients against one base URL: the chat-completions
//! gateway (planning and step execution) and the embeddings client
//! (instruction corpus indexing). Both speak the wire format in
//! [`protocol`], which any OpenAI-compatible server accepts.

pub mod embeddings;
pub mod gateway;
pub mod protocol;

pub use embeddings::OpenAiEmbeddings;
pub use gateway::OpenAiGateway;
