//! Domain layer for bootsmith
//!
//! This crate contains the core entities and pure logic of the project
//! bootstrapper. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Conversation**: the ordered message history of a single step
//!   execution. Each step runs its own conversation; there is no cross-step
//!   memory.
//! - **Tool Registry**: the fixed, immutable set of tools the model may
//!   call while executing a step.
//! - **Instruction Corpus**: a numbered-list document split into entries
//!   that are retrieved per step as additional guidance.
//! - **Step**: an opaque natural-language setup instruction produced by the
//!   planner; the atomic unit of execution.

pub mod conversation;
pub mod core;
pub mod instructions;
pub mod plan;
pub mod project;
pub mod prompt;
pub mod tool;

// Re-export commonly used types
pub use conversation::{Conversation, Message, Role};
pub use instructions::{CorpusEntry, RetrievalConfig, split_corpus};
pub use plan::{Step, StepListError, parse_step_list};
pub use project::ProjectProfile;
pub use prompt::BootstrapPrompt;
pub use tool::{
    call::{ArgumentError, ToolArguments, ToolCallRequest},
    entities::{DispatchKind, ToolDefinition, ToolParameter, ToolRegistry},
    value_objects::{ToolError, ToolResult},
};
