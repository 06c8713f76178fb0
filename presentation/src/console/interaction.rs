//! Stdin adapter for the `ask` tool.
//!
//! When the model calls `ask`, execution blocks here until the user types
//! an answer. The question is highlighted so it stands out from progress
//! output.

use async_trait::async_trait;
use bootsmith_application::ports::interaction::{InteractionError, UserInteractionPort};
use colored::Colorize;
use std::io::{self, Write};

/// Terminal question/answer exchange.
pub struct StdinInteraction;

impl StdinInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinInteraction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserInteractionPort for StdinInteraction {
    async fn ask(&self, question: &str) -> Result<String, InteractionError> {
        println!();
        println!("{} {}", "?".yellow().bold(), question.bold());
        print!("{} ", ">".yellow());
        io::stdout()
            .flush()
            .map_err(|e| InteractionError::IoError(e.to_string()))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| InteractionError::IoError(e.to_string()))?;
        if bytes == 0 {
            return Err(InteractionError::InputClosed);
        }

        Ok(input.trim().to_string())
    }
}
