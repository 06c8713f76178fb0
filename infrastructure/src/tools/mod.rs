//! Bootstrap tools and their local executor.
//!
//! Five tools are exposed to the model: two file mutators/readers, a
//! directory listing, an npm installer, and `ask`. The `ask` tool is
//! declared here so the model sees it, but its handler is the user
//! interaction port — the orchestration loop routes it before the
//! executor is consulted.

pub mod executor;
pub mod file;
pub mod npm;
pub mod schema;
pub mod structure;

pub use executor::LocalToolExecutor;
pub use schema::{registry_schemas, tool_to_function_schema};

use bootsmith_domain::{DispatchKind, ToolDefinition, ToolParameter, ToolRegistry, tool};

/// Get the tool definition for ask
pub fn ask_definition() -> ToolDefinition {
    ToolDefinition::new(
        tool::ASK,
        "Ask the user a clarifying question and wait for their typed answer. \
         Use this whenever a value is ambiguous instead of guessing.",
        DispatchKind::Informational,
    )
    .with_parameter(
        ToolParameter::new("question", "The question to ask the user", true).with_type("string"),
    )
}

/// The canonical registry exposed to the model during step execution.
pub fn bootstrap_registry() -> ToolRegistry {
    ToolRegistry::new()
        .register(structure::get_file_structure_definition())
        .register(file::write_to_file_definition())
        .register(file::get_file_contents_definition())
        .register(npm::install_npm_package_definition())
        .register(ask_definition())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_all_five_tools() {
        let registry = bootstrap_registry();

        assert_eq!(registry.len(), 5);
        for name in [
            tool::GET_FILE_STRUCTURE,
            tool::WRITE_TO_FILE,
            tool::GET_FILE_CONTENTS,
            tool::INSTALL_NPM_PACKAGE,
            tool::ASK,
        ] {
            assert!(registry.find(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_dispatch_kinds() {
        let registry = bootstrap_registry();

        assert!(registry.find(tool::GET_FILE_STRUCTURE).unwrap().is_informational());
        assert!(registry.find(tool::GET_FILE_CONTENTS).unwrap().is_informational());
        assert!(registry.find(tool::ASK).unwrap().is_informational());
        assert!(!registry.find(tool::WRITE_TO_FILE).unwrap().is_informational());
        assert!(!registry.find(tool::INSTALL_NPM_PACKAGE).unwrap().is_informational());
    }
}
