//! Run Bootstrap use case — the end-to-end driver.
//!
//! Plans the ordered step list for a project profile, then executes every
//! step in order. An abandoned step is recorded and the run moves on — a
//! stuck conversation should not waste the work the remaining steps can
//! still do. Only infrastructure failures (gateway, interaction) abort the
//! run.

use crate::ports::progress::BootstrapProgress;
use crate::use_cases::execute_step::{ExecuteStepError, ExecuteStepUseCase, StepOutcome};
use crate::use_cases::plan_steps::{PlanError, PlanStepsUseCase};
use bootsmith_domain::{ProjectProfile, Step};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort the whole bootstrap run.
#[derive(Error, Debug)]
pub enum RunBootstrapError {
    #[error("Planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: ExecuteStepError,
    },
}

/// What happened to each planned step, in execution order.
#[derive(Debug)]
pub struct BootstrapReport {
    pub steps: Vec<(Step, StepOutcome)>,
}

impl BootstrapReport {
    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|(_, o)| o.is_completed()).count()
    }

    pub fn abandoned(&self) -> usize {
        self.steps.len() - self.completed()
    }

    pub fn all_completed(&self) -> bool {
        self.abandoned() == 0
    }
}

/// Use case for bootstrapping a whole project.
pub struct RunBootstrapUseCase {
    planner: PlanStepsUseCase,
    executor: ExecuteStepUseCase,
}

impl RunBootstrapUseCase {
    pub fn new(planner: PlanStepsUseCase, executor: ExecuteStepUseCase) -> Self {
        Self { planner, executor }
    }

    /// Plan and execute the full setup for `profile`.
    pub async fn execute(
        &self,
        profile: &ProjectProfile,
        progress: &dyn BootstrapProgress,
    ) -> Result<BootstrapReport, RunBootstrapError> {
        info!(
            "Bootstrapping '{}' ({}) with: {}",
            profile.name,
            profile.project_type,
            profile.technologies_display()
        );

        progress.on_planning_started();
        let steps = self.planner.execute(profile).await?;
        progress.on_steps_planned(&steps);

        let total = steps.len();
        let mut report = BootstrapReport {
            steps: Vec::with_capacity(total),
        };

        for (i, step) in steps.into_iter().enumerate() {
            let index = i + 1;
            progress.on_step_started(index, total, &step);

            let outcome = self
                .executor
                .execute(&step, profile, progress)
                .await
                .map_err(|source| RunBootstrapError::StepFailed {
                    step: step.as_str().to_string(),
                    source,
                })?;

            if !outcome.is_completed() {
                warn!("Step {}/{} abandoned: {}", index, total, step);
            }
            progress.on_step_finished(index, &step, &outcome);
            report.steps.push((step, outcome));
        }

        info!(
            "Bootstrap finished: {}/{} steps completed",
            report.completed(),
            total
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction_store::InstructionStore;
    use crate::ports::embeddings::{EmbeddingError, EmbeddingPort};
    use crate::ports::interaction::InteractionError;
    use crate::ports::llm_gateway::{GatewayError, LlmGateway, ModelTurn};
    use crate::ports::progress::NoProgress;
    use crate::ports::tool_executor::ToolExecutorPort;
    use crate::ports::interaction::UserInteractionPort;
    use crate::use_cases::execute_step::ExecutionParams;
    use async_trait::async_trait;
    use bootsmith_domain::{
        Conversation, DispatchKind, RetrievalConfig, ToolArguments, ToolCallRequest,
        ToolDefinition, ToolRegistry, ToolResult, tool,
    };
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct MockGateway {
        turns: Mutex<VecDeque<ModelTurn>>,
    }

    impl MockGateway {
        fn new(turns: Vec<ModelTurn>) -> Self {
            Self {
                turns: Mutex::new(VecDeque::from(turns)),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            _conversation: &Conversation,
            _tools: &[serde_json::Value],
            _temperature: f32,
        ) -> Result<ModelTurn, GatewayError> {
            self.turns
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more turns".to_string()))
        }
    }

    struct MockToolExecutor {
        registry: ToolRegistry,
    }

    impl MockToolExecutor {
        fn new() -> Self {
            Self {
                registry: ToolRegistry::new().register(ToolDefinition::new(
                    tool::WRITE_TO_FILE,
                    "Write a file",
                    DispatchKind::Terminal,
                )),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockToolExecutor {
        fn registry(&self) -> &ToolRegistry {
            &self.registry
        }

        async fn execute(&self, tool_name: &str, _arguments: &ToolArguments) -> ToolResult {
            ToolResult::success(tool_name, "ok")
        }
    }

    struct NoInteraction;

    #[async_trait]
    impl UserInteractionPort for NoInteraction {
        async fn ask(&self, _question: &str) -> Result<String, InteractionError> {
            Err(InteractionError::InputClosed)
        }
    }

    struct NullEmbeddings;

    #[async_trait]
    impl EmbeddingPort for NullEmbeddings {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }
    }

    async fn use_case(turns: Vec<ModelTurn>, params: ExecutionParams) -> RunBootstrapUseCase {
        let gateway = Arc::new(MockGateway::new(turns));
        let mut store = InstructionStore::new(Arc::new(NullEmbeddings), RetrievalConfig::default());
        store.load("").await.unwrap();

        let planner = PlanStepsUseCase::new(gateway.clone());
        let executor = ExecuteStepUseCase::new(
            gateway,
            Arc::new(MockToolExecutor::new()),
            Arc::new(NoInteraction),
            Arc::new(store),
            vec![],
        )
        .with_params(params);
        RunBootstrapUseCase::new(planner, executor)
    }

    fn profile() -> ProjectProfile {
        ProjectProfile::new(
            "my-app",
            "web application",
            "A demo app",
            vec!["React".to_string(), "ESLint".to_string()],
        )
    }

    #[tokio::test]
    async fn test_runs_all_planned_steps_in_order() {
        let uc = use_case(
            vec![
                // Planning turn.
                ModelTurn::from_text(r#"["Install React", "Configure ESLint"]"#),
                // Step 1 completes immediately.
                ModelTurn::from_text("React installed."),
                // Step 2 writes a file, then completes.
                ModelTurn {
                    content: None,
                    tool_calls: vec![ToolCallRequest::new(
                        tool::WRITE_TO_FILE,
                        r#"{"path":".eslintrc.json","contents":"{}"}"#,
                    )],
                },
                ModelTurn::from_text("ESLint configured."),
            ],
            ExecutionParams::default(),
        )
        .await;

        let report = uc.execute(&profile(), &NoProgress).await.unwrap();

        assert!(report.all_completed());
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].0.as_str(), "Install React");
        assert_eq!(report.steps[1].0.as_str(), "Configure ESLint");
    }

    #[tokio::test]
    async fn test_abandoned_step_does_not_stop_the_run() {
        let uc = use_case(
            vec![
                ModelTurn::from_text(r#"["Stuck step", "Easy step"]"#),
                // Step 1 hits the one-turn cap.
                ModelTurn {
                    content: None,
                    tool_calls: vec![ToolCallRequest::new(
                        tool::WRITE_TO_FILE,
                        r#"{"path":"a","contents":"x"}"#,
                    )],
                },
                // Step 2 completes.
                ModelTurn::from_text("Done."),
            ],
            ExecutionParams::default().with_max_turns(1),
        )
        .await;

        let report = uc.execute(&profile(), &NoProgress).await.unwrap();

        assert_eq!(report.abandoned(), 1);
        assert_eq!(report.completed(), 1);
        assert!(!report.steps[0].1.is_completed());
        assert!(report.steps[1].1.is_completed());
    }

    #[tokio::test]
    async fn test_planning_failure_aborts_run() {
        let uc = use_case(
            vec![ModelTurn::from_text("I refuse to answer in JSON.")],
            ExecutionParams::default(),
        )
        .await;

        let result = uc.execute(&profile(), &NoProgress).await;
        assert!(matches!(result, Err(RunBootstrapError::Plan(_))));
    }
}
