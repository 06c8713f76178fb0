//! Port definitions (interfaces to the outside world)

pub mod conversation_logger;
pub mod embeddings;
pub mod interaction;
pub mod llm_gateway;
pub mod progress;
pub mod tool_executor;
