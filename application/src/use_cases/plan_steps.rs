//! Plan Steps use case.
//!
//! Asks the model for the ordered list of setup steps that will bootstrap
//! a project with the chosen technologies. The model must answer with a
//! JSON array of strings; anything else is a planning failure.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use bootsmith_domain::{
    BootstrapPrompt, Conversation, Message, ProjectProfile, Step, StepListError, parse_step_list,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during planning.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model returned an unusable step list: {0}")]
    InvalidStepList(#[from] StepListError),

    #[error("Model returned no content")]
    EmptyResponse,
}

/// Use case for producing the ordered setup plan.
pub struct PlanStepsUseCase {
    gateway: Arc<dyn LlmGateway>,
    temperature: f32,
}

impl PlanStepsUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            temperature: 0.1,
        }
    }

    /// Request and parse the setup steps for `profile`.
    pub async fn execute(&self, profile: &ProjectProfile) -> Result<Vec<Step>, PlanError> {
        let request = BootstrapPrompt::steps_request(&profile.technologies_display());
        debug!("Requesting setup plan: {}", request);

        let conversation = Conversation::seeded(
            Message::system(BootstrapPrompt::execution_system(&profile.project_type)),
            Message::user(request),
        );

        // Planning is a pure text exchange — no tools offered.
        let turn = self
            .gateway
            .complete(&conversation, &[], self.temperature)
            .await?;

        let content = turn
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(PlanError::EmptyResponse)?;
        let steps = parse_step_list(content)?;

        info!("Planned {} setup steps", steps.len());
        Ok(steps)
    }
}
