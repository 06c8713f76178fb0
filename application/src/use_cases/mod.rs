//! Use cases — the bootstrap workflows.
//!
//! Each use case wires domain logic to the ports and exposes a single
//! `execute` entry point. Composition happens in the binary.

pub mod execute_step;
pub mod plan_steps;
pub mod run_bootstrap;

pub use execute_step::{ExecuteStepError, ExecuteStepUseCase, ExecutionParams, StepOutcome};
pub use plan_steps::{PlanError, PlanStepsUseCase};
pub use run_bootstrap::{BootstrapReport, RunBootstrapError, RunBootstrapUseCase};
