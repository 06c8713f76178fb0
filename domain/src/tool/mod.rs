//! Tool system domain types
//!
//! The tool system is split into:
//! - `entities` — definitions, dispatch categories, and the registry
//! - `call` — tool call requests emitted by the model and their argument
//!   parsing
//! - `value_objects` — execution results and errors
//!
//! Canonical tool names are declared here: the registry is fixed at process
//! start and both the orchestration loop and the tool executor refer to
//! tools by these names.

pub mod call;
pub mod entities;
pub mod value_objects;

/// Recursively list files and directories.
pub const GET_FILE_STRUCTURE: &str = "getFileStructure";
/// Create or overwrite a file.
pub const WRITE_TO_FILE: &str = "writeToFile";
/// Read a file as text.
pub const GET_FILE_CONTENTS: &str = "getFileContents";
/// Install an npm package.
pub const INSTALL_NPM_PACKAGE: &str = "installNPMPackage";
/// Ask the user a clarifying question.
pub const ASK: &str = "ask";
