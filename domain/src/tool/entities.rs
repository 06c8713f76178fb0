//! Tool definitions and the registry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a tool's result feeds back into the orchestration loop.
///
/// Terminal tools produce an external side effect and let the current batch
/// of calls continue; informational tools return data the model needs to see
/// immediately, so dispatching one interrupts the batch and forces a fresh
/// model turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchKind {
    /// Side-effecting call (write a file, install a package); batch
    /// processing continues past it.
    Terminal,
    /// Data-returning call (read, list, ask); the model is re-invoked
    /// immediately after it.
    Informational,
}

impl DispatchKind {
    pub fn interrupts_batch(&self) -> bool {
        matches!(self, DispatchKind::Informational)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DispatchKind::Terminal => "terminal",
            DispatchKind::Informational => "informational",
        }
    }
}

impl std::fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "boolean")
    pub param_type: String,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Definition of a tool the model may call during a step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "writeToFile")
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// How the result feeds back into the loop
    pub dispatch: DispatchKind,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        dispatch: DispatchKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dispatch,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_informational(&self) -> bool {
        self.dispatch.interrupts_batch()
    }
}

/// The canonical, immutable set of tools exposed to the model.
///
/// Built once at process start; lookup only after that. Every tool call
/// request must resolve against the registry used for its conversation —
/// unresolved names are reported and skipped by the orchestration loop.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
    /// Declaration order, preserved so schemas sent to the model are stable.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        if !self.tools.contains_key(&tool.name) {
            self.order.push(tool.name.clone());
        }
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn find(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Iterate tools in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(|n| self.tools.get(n))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
