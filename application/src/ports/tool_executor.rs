//! Tool executor port
//!
//! The orchestration loop resolves and parses tool calls itself; the
//! executor receives the canonical tool name plus parsed arguments and runs
//! the side effect. Failures come back inside the [`ToolResult`], never as
//! a transport error — the loop logs them and moves on.

use async_trait::async_trait;
use bootsmith_domain::{ToolArguments, ToolRegistry, ToolResult};

/// Port for executing tools on the local machine.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// The registry of tools this executor can run.
    fn registry(&self) -> &ToolRegistry;

    /// Execute a tool call with already-parsed arguments.
    async fn execute(&self, tool_name: &str, arguments: &ToolArguments) -> ToolResult;
}
