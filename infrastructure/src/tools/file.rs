//! File operation tools: writeToFile, getFileContents

use bootsmith_domain::{
    DispatchKind, ToolArguments, ToolDefinition, ToolError, ToolParameter, ToolResult, tool,
};
use std::fs;
use std::path::Path;
use tracing::info;

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

/// Get the tool definition for writeToFile
pub fn write_to_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        tool::WRITE_TO_FILE,
        "Write data to a file at the specified path. Creates the file if it \
         doesn't exist, or overwrites it if it does. Parent directories are \
         created as needed.",
        DispatchKind::Terminal,
    )
    .with_parameter(
        ToolParameter::new("filepath", "Path of the file to write", true).with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("data", "Content to write to the file", true).with_type("string"),
    )
}

/// Get the tool definition for getFileContents
pub fn get_file_contents_definition() -> ToolDefinition {
    ToolDefinition::new(
        tool::GET_FILE_CONTENTS,
        "Read the contents of a file at the specified path",
        DispatchKind::Informational,
    )
    .with_parameter(ToolParameter::new("path", "Path to the file to read", true).with_type("path"))
}

/// Execute the writeToFile tool
pub fn execute_write_to_file(args: &ToolArguments) -> ToolResult {
    let path_str = match args.require_string("filepath") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(tool::WRITE_TO_FILE, ToolError::invalid_argument(e)),
    };

    let data = match args.require_string("data") {
        Ok(d) => d,
        Err(e) => return ToolResult::failure(tool::WRITE_TO_FILE, ToolError::invalid_argument(e)),
    };

    let path = Path::new(path_str);
    let existed = path.exists();

    if existed && !path.is_file() {
        return ToolResult::failure(
            tool::WRITE_TO_FILE,
            ToolError::invalid_argument(format!("'{}' exists and is not a file", path_str)),
        );
    }

    // Setup steps routinely write into directories that don't exist yet
    // (e.g. src/index.ts in a fresh project).
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return ToolResult::failure(
            tool::WRITE_TO_FILE,
            ToolError::execution_failed(format!("Failed to create parent directories: {}", e)),
        );
    }

    if existed {
        info!("Overwriting {}", path_str);
    } else {
        info!("Creating {}", path_str);
    }

    if let Err(e) = fs::write(path, data) {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            return ToolResult::failure(tool::WRITE_TO_FILE, ToolError::permission_denied(path_str));
        }
        return ToolResult::failure(
            tool::WRITE_TO_FILE,
            ToolError::execution_failed(format!("Failed to write file: {}", e)),
        );
    }

    let verb = if existed { "Overwrote" } else { "Created" };
    ToolResult::success(tool::WRITE_TO_FILE, format!("{} file: {}", verb, path_str))
        .with_path(path_str)
}

/// Execute the getFileContents tool
pub fn execute_get_file_contents(args: &ToolArguments) -> ToolResult {
    let path_str = match args.require_string("path") {
        Ok(p) => p,
        Err(e) => {
            return ToolResult::failure(tool::GET_FILE_CONTENTS, ToolError::invalid_argument(e));
        }
    };

    let path = Path::new(path_str);

    if !path.exists() {
        return ToolResult::failure(tool::GET_FILE_CONTENTS, ToolError::not_found(path_str));
    }

    if !path.is_file() {
        return ToolResult::failure(
            tool::GET_FILE_CONTENTS,
            ToolError::invalid_argument(format!("'{}' is not a file", path_str)),
        );
    }

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return ToolResult::failure(
                tool::GET_FILE_CONTENTS,
                ToolError::execution_failed(format!("Failed to get file metadata: {}", e)),
            );
        }
    };

    if metadata.len() > MAX_READ_SIZE {
        return ToolResult::failure(
            tool::GET_FILE_CONTENTS,
            ToolError::invalid_argument(format!(
                "File too large ({} bytes). Maximum size is {} bytes",
                metadata.len(),
                MAX_READ_SIZE
            )),
        );
    }

    match fs::read_to_string(path) {
        Ok(content) => {
            ToolResult::success(tool::GET_FILE_CONTENTS, content).with_path(path_str)
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                return ToolResult::failure(
                    tool::GET_FILE_CONTENTS,
                    ToolError::permission_denied(path_str),
                );
            }
            ToolResult::failure(
                tool::GET_FILE_CONTENTS,
                ToolError::execution_failed(format!("Failed to read file: {}", e)),
            )
        }
    }
}
