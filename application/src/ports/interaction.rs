//! User interaction port for the `ask` tool.
//!
//! `ask` is the one tool whose result comes from a human: the orchestration
//! loop presents the model's question, blocks for a typed answer, and
//! appends both to the conversation. The stdin adapter lives in the
//! presentation layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while prompting the user
#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Input closed")]
    InputClosed,
}

/// Blocking question/answer exchange with the user.
#[async_trait]
pub trait UserInteractionPort: Send + Sync {
    /// Present `question` and wait for a free-text answer.
    async fn ask(&self, question: &str) -> Result<String, InteractionError>;
}
