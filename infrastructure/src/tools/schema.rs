//! Tool definition → chat-completions function schema.
//!
//! The chat API expects each tool as
//! `{"type": "function", "function": {name, description, parameters}}`
//! where `parameters` is a JSON Schema object with a `required` list.
//!
//! Handles param_type → JSON Schema type mapping:
//! - `"string"`, `"path"` → `"string"`
//! - `"number"` → `"number"`
//! - `"integer"` → `"integer"`
//! - `"boolean"` → `"boolean"`
//! - anything else → `"string"`

use bootsmith_domain::{ToolDefinition, ToolRegistry};

/// Convert one tool definition to a function declaration.
pub fn tool_to_function_schema(tool: &ToolDefinition) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in &tool.parameters {
        let schema_type = match param.param_type.as_str() {
            "string" | "path" => "string",
            "number" => "number",
            "integer" => "integer",
            "boolean" => "boolean",
            _ => "string",
        };

        let mut prop = serde_json::Map::new();
        prop.insert("type".to_string(), serde_json::json!(schema_type));
        prop.insert(
            "description".to_string(),
            serde_json::json!(param.description),
        );
        properties.insert(param.name.clone(), serde_json::Value::Object(prop));

        if param.required {
            required.push(serde_json::json!(param.name));
        }
    }

    serde_json::json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        }
    })
}

/// Convert a whole registry, preserving declaration order.
pub fn registry_schemas(registry: &ToolRegistry) -> Vec<serde_json::Value> {
    registry.all().map(tool_to_function_schema).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::bootstrap_registry;
    use bootsmith_domain::{DispatchKind, ToolParameter, tool};

    #[test]
    fn test_tool_to_function_schema() {
        let tool = ToolDefinition::new(
            tool::WRITE_TO_FILE,
            "Write data to a file",
            DispatchKind::Terminal,
        )
        .with_parameter(ToolParameter::new("filepath", "Path of the file", true).with_type("path"))
        .with_parameter(ToolParameter::new("data", "Content to write", true).with_type("string"))
        .with_parameter(
            ToolParameter::new("dev", "Unused toggle", false).with_type("boolean"),
        );

        let schema = tool_to_function_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "writeToFile");
        assert_eq!(schema["function"]["parameters"]["type"], "object");

        let props = &schema["function"]["parameters"]["properties"];
        assert_eq!(props["filepath"]["type"], "string"); // "path" maps to "string"
        assert_eq!(props["data"]["type"], "string");
        assert_eq!(props["dev"]["type"], "boolean");

        let required = schema["function"]["parameters"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&serde_json::json!("filepath")));
        assert!(!required.contains(&serde_json::json!("dev")));
    }

    #[test]
    fn test_registry_schemas_preserve_declaration_order() {
        let schemas = registry_schemas(&bootstrap_registry());

        assert_eq!(schemas.len(), 5);
        assert_eq!(schemas[0]["function"]["name"], "getFileStructure");
        assert_eq!(schemas[4]["function"]["name"], "ask");
    }
}
