//! npm installer tool: installNPMPackage

use bootsmith_domain::{
    DispatchKind, ToolArguments, ToolDefinition, ToolError, ToolParameter, ToolResult, tool,
};
use std::path::Path;
use tokio::process::Command;
use tracing::info;

/// Get the tool definition for installNPMPackage
pub fn install_npm_package_definition() -> ToolDefinition {
    ToolDefinition::new(
        tool::INSTALL_NPM_PACKAGE,
        "Install an npm package into the project. Set dev to true for \
         development-only dependencies.",
        DispatchKind::Terminal,
    )
    .with_parameter(
        ToolParameter::new("packageName", "Name of the npm package to install", true)
            .with_type("string"),
    )
    .with_parameter(
        ToolParameter::new("dev", "Install as a dev dependency (default: false)", false)
            .with_type("boolean"),
    )
}

/// The package name goes straight onto an npm command line; reject
/// anything that isn't a plain (possibly scoped, possibly versioned)
/// package identifier.
fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 214
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '/' | '.' | '-' | '_' | '^' | '~' | '<' | '>' | '='))
}

/// Execute the installNPMPackage tool
pub async fn execute_install_npm_package(
    working_dir: Option<&Path>,
    args: &ToolArguments,
) -> ToolResult {
    let package = match args.require_string("packageName") {
        Ok(p) => p,
        Err(e) => {
            return ToolResult::failure(tool::INSTALL_NPM_PACKAGE, ToolError::invalid_argument(e));
        }
    };

    if !is_valid_package_name(package) {
        return ToolResult::failure(
            tool::INSTALL_NPM_PACKAGE,
            ToolError::invalid_argument(format!("'{}' is not a valid npm package name", package)),
        );
    }

    let dev = args.get_bool("dev").unwrap_or(false);
    let save_flag = if dev { "--save-dev" } else { "-s" };

    info!("Installing npm package {} ({})", package, save_flag);

    let mut command = Command::new("npm");
    command.args(["install", package, save_flag]);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    let output = match command.output().await {
        Ok(o) => o,
        Err(e) => {
            return ToolResult::failure(
                tool::INSTALL_NPM_PACKAGE,
                ToolError::execution_failed(format!("Failed to run npm: {}", e)),
            );
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    if output.status.success() {
        ToolResult::success(
            tool::INSTALL_NPM_PACKAGE,
            format!("Installed {}{}", package, if dev { " (dev)" } else { "" }),
        )
        .with_exit_code(exit_code)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        ToolResult::failure(
            tool::INSTALL_NPM_PACKAGE,
            ToolError::execution_failed(format!(
                "npm install {} exited with {}: {}",
                package,
                exit_code,
                stderr.trim()
            )),
        )
        .with_exit_code(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_validation() {
        assert!(is_valid_package_name("eslint"));
        assert!(is_valid_package_name("@types/node"));
        assert!(is_valid_package_name("typescript@^5.0.0"));

        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("eslint; rm -rf /"));
        assert!(!is_valid_package_name("pkg name with spaces"));
    }

    #[tokio::test]
    async fn test_missing_package_name_argument() {
        let result = execute_install_npm_package(None, &ToolArguments::new()).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_shell_metacharacters_rejected() {
        let args = ToolArguments::new().with_arg("packageName", "evil && touch pwned");
        let result = execute_install_npm_package(None, &args).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }
}
