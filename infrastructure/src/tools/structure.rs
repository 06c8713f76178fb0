//! Directory listing tool: getFileStructure

use bootsmith_domain::{
    DispatchKind, ToolArguments, ToolDefinition, ToolError, ToolParameter, ToolResult, tool,
};
use std::path::Path;

/// Directories never worth showing the model.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Get the tool definition for getFileStructure
pub fn get_file_structure_definition() -> ToolDefinition {
    ToolDefinition::new(
        tool::GET_FILE_STRUCTURE,
        "List the file structure of a directory recursively. Returns a JSON \
         tree of files and directories.",
        DispatchKind::Informational,
    )
    .with_parameter(
        ToolParameter::new(
            "path",
            "Directory to list (default: the project root)",
            false,
        )
        .with_type("path"),
    )
}

/// Execute the getFileStructure tool
pub fn execute_get_file_structure(args: &ToolArguments) -> ToolResult {
    let path_str = args.get_string("path").unwrap_or("./");
    let path = Path::new(path_str);

    if !path.exists() {
        return ToolResult::failure(tool::GET_FILE_STRUCTURE, ToolError::not_found(path_str));
    }

    if !path.is_dir() {
        return ToolResult::failure(
            tool::GET_FILE_STRUCTURE,
            ToolError::invalid_argument(format!("'{}' is not a directory", path_str)),
        );
    }

    match list_directory(path) {
        Ok(entries) => {
            let json = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());
            ToolResult::success(tool::GET_FILE_STRUCTURE, json).with_path(path_str)
        }
        Err(e) => ToolResult::failure(
            tool::GET_FILE_STRUCTURE,
            ToolError::execution_failed(format!("Failed to list '{}': {}", path_str, e)),
        ),
    }
}

/// Recursively list a directory as JSON values: files become
/// `{name, type}`, directories `{path, name, type, children}`.
fn list_directory(dir: &Path) -> std::io::Result<Vec<serde_json::Value>> {
    let mut entries = Vec::new();

    let mut dir_entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    // Stable ordering so repeated listings don't look like changes.
    dir_entries.sort_by_key(|e| e.file_name());

    for entry in dir_entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if SKIPPED_DIRS.contains(&name.as_str()) {
                continue;
            }
            let children = list_directory(&entry.path())?;
            entries.push(serde_json::json!({
                "path": dir.to_string_lossy(),
                "name": name,
                "type": "directory",
                "children": children,
            }));
        } else {
            entries.push(serde_json::json!({
                "name": name,
                "type": "file",
            }));
        }
    }

    Ok(entries)
}
