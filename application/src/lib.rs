//! Application layer for bootsmith
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; concrete adapters (OpenAI gateway, local tool
//! executor, stdin prompts) live in the infrastructure and presentation
//! layers and are injected at the binary boundary.

pub mod instruction_store;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use instruction_store::{InstructionStore, InstructionStoreError};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    embeddings::{EmbeddingError, EmbeddingPort},
    interaction::{InteractionError, UserInteractionPort},
    llm_gateway::{GatewayError, LlmGateway, ModelTurn},
    progress::{BootstrapProgress, NoProgress},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::{
    execute_step::{ExecuteStepError, ExecuteStepUseCase, ExecutionParams, StepOutcome},
    plan_steps::{PlanError, PlanStepsUseCase},
    run_bootstrap::{BootstrapReport, RunBootstrapError, RunBootstrapUseCase},
};
