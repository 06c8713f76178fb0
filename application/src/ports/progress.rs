//! Progress notification port for bootstrap execution.
//!
//! Presentation layers implement this to show planning and per-step
//! progress; use cases call it at each phase boundary. All methods have
//! empty defaults so implementations override only what they render.

use crate::use_cases::execute_step::StepOutcome;
use bootsmith_domain::Step;

/// Observer for bootstrap progress events.
pub trait BootstrapProgress: Send + Sync {
    /// Planning request sent to the model.
    fn on_planning_started(&self) {}

    /// The planner produced an ordered step list.
    fn on_steps_planned(&self, _steps: &[Step]) {}

    /// A step's conversation is starting (1-based index).
    fn on_step_started(&self, _index: usize, _total: usize, _step: &Step) {}

    /// A tool call was dispatched within the current step.
    fn on_tool_dispatched(&self, _tool_name: &str, _success: bool) {}

    /// A tool call could not be dispatched (unresolved name or malformed
    /// arguments).
    fn on_tool_skipped(&self, _tool_name: &str, _reason: &str) {}

    /// A step finished with the given outcome.
    fn on_step_finished(&self, _index: usize, _step: &Step, _outcome: &StepOutcome) {}
}

/// No-op progress implementation for tests and quiet mode.
pub struct NoProgress;

impl BootstrapProgress for NoProgress {}
