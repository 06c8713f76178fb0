//! Step list parsing from planner responses.
//!
//! The planner asks the model for a JSON array of setup step descriptions.
//! The reply must parse as an array of strings — markdown code fences are
//! stripped first, but no other repair is attempted. A reply that is not a
//! valid string array fails the whole run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque natural-language setup instruction; the atomic unit of
/// execution. The system never inspects a step's internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step(pub String);

impl Step {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Step {
    fn from(s: &str) -> Self {
        Step(s.to_string())
    }
}

/// Planner reply that could not be turned into a step list.
#[derive(Error, Debug)]
pub enum StepListError {
    #[error("Planner reply is not a JSON array of strings: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Planner returned an empty step list")]
    Empty,
}

/// Parse a planner reply into an ordered step list.
///
/// Accepts either raw JSON or a single fenced code block (```json ... ```
/// or bare ```). Order is preserved.
pub fn parse_step_list(response: &str) -> Result<Vec<Step>, StepListError> {
    let body = strip_code_fence(response);
    let steps: Vec<String> = serde_json::from_str(body)?;
    if steps.is_empty() {
        return Err(StepListError::Empty);
    }
    Ok(steps.into_iter().map(Step).collect())
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
