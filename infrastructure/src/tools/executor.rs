//! Local tool executor — the concrete implementation of [`ToolExecutorPort`].
//!
//! Routes each resolved tool call to its handler: file and directory tools
//! run synchronously, npm installs go through an async subprocess. The
//! `ask` tool has no handler here — the orchestration loop routes it to
//! the user interaction port before consulting the executor.

use async_trait::async_trait;
use bootsmith_application::ports::tool_executor::ToolExecutorPort;
use bootsmith_domain::{ToolArguments, ToolError, ToolRegistry, ToolResult, tool};
use std::path::PathBuf;

use super::{file, npm, structure};

/// Executor that runs the bootstrap tools on the local machine.
pub struct LocalToolExecutor {
    registry: ToolRegistry,
    /// Working directory for npm installs (None = current directory).
    working_dir: Option<PathBuf>,
}

impl LocalToolExecutor {
    /// Create a new executor with the full bootstrap registry.
    pub fn new() -> Self {
        Self {
            registry: super::bootstrap_registry(),
            working_dir: None,
        }
    }

    /// Run npm installs in `dir` instead of the process working directory.
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }
}

impl Default for LocalToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn execute(&self, tool_name: &str, arguments: &ToolArguments) -> ToolResult {
        match tool_name {
            tool::GET_FILE_STRUCTURE => structure::execute_get_file_structure(arguments),
            tool::WRITE_TO_FILE => file::execute_write_to_file(arguments),
            tool::GET_FILE_CONTENTS => file::execute_get_file_contents(arguments),
            tool::INSTALL_NPM_PACKAGE => {
                npm::execute_install_npm_package(self.working_dir.as_deref(), arguments).await
            }
            // `ask` is dispatched by the orchestration loop; reaching the
            // executor means a wiring bug.
            tool::ASK => ToolResult::failure(
                tool::ASK,
                ToolError::execution_failed("ask must be routed to the user, not the executor"),
            ),
            other => ToolResult::failure(other, ToolError::not_found(other)),
        }
    }
}
