//! Embedding provider port
//!
//! The instruction store embeds the whole corpus once at load and each
//! query at search time. Vectors are fixed-dimension; similarity between
//! them is cosine, computed locally by the store.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while computing embeddings
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Provider of text embeddings.
#[async_trait]
pub trait EmbeddingPort: Send + Sync {
    /// Embed a batch of texts, returning one vector per input in order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
