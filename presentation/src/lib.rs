//! Presentation layer for bootsmith
//!
//! This crate contains the CLI definition, the interactive project
//! questionnaire, the stdin adapter for the `ask` tool, and the progress
//! reporter.

pub mod cli;
pub mod console;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use console::interaction::StdinInteraction;
pub use console::questionnaire::{Questionnaire, QuestionnaireError};
pub use progress::reporter::ProgressReporter;
