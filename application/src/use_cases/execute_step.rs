//! Execute Step use case — the tool-calling orchestration loop.
//!
//! Runs one setup step to completion: seed a fresh conversation, look up
//! corpus guidance for the step, then alternate between model turns and
//! tool dispatch until the model answers without requesting any tools.
//!
//! Dispatch rules within a single model turn:
//! - a tool name already dispatched this turn is dropped (idempotency
//!   guard against the model repeating itself);
//! - unresolved names and malformed arguments are logged and skipped,
//!   never fatal;
//! - [`DispatchKind::Terminal`] results are appended as function messages
//!   and the batch continues;
//! - [`DispatchKind::Informational`] results interrupt the batch: the
//!   model is re-invoked immediately and its new calls (minus already
//!   dispatched names) replace whatever was left of the batch. `ask`
//!   routes to the user and appends question/answer as assistant/user
//!   messages instead; an unanswerable `ask` (closed stdin) is skipped
//!   like any other failed call.
//!
//! Each step has an explicit turn cap; exceeding it yields
//! [`StepOutcome::Abandoned`] rather than looping forever.

use crate::instruction_store::{InstructionStore, InstructionStoreError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::interaction::UserInteractionPort;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, ModelTurn};
use crate::ports::progress::BootstrapProgress;
use crate::ports::tool_executor::ToolExecutorPort;
use bootsmith_domain::core::string::truncate;
use bootsmith_domain::{
    BootstrapPrompt, Conversation, Message, ProjectProfile, Step, ToolCallRequest, tool,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a step outright.
///
/// Tool-level failures never appear here; they are fed back to the model
/// inside the conversation.
#[derive(Error, Debug)]
pub enum ExecuteStepError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Instruction lookup failed: {0}")]
    Instructions(#[from] InstructionStoreError),
}

/// Knobs for the orchestration loop.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionParams {
    /// Sampling temperature for every model turn (setup work wants
    /// deterministic answers).
    pub temperature: f32,
    /// Model invocations allowed per step before the step is abandoned.
    pub max_turns: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_turns: 12,
        }
    }
}

impl ExecutionParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// How a step's conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The model finished the step (a turn with no tool call requests).
    Completed { turns: usize },
    /// The turn cap was hit before the model finished.
    Abandoned { turns: usize },
}

impl StepOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed { .. })
    }

    pub fn turns(&self) -> usize {
        match self {
            StepOutcome::Completed { turns } | StepOutcome::Abandoned { turns } => *turns,
        }
    }
}

/// Use case for executing a single setup step.
pub struct ExecuteStepUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    interaction: Arc<dyn UserInteractionPort>,
    instructions: Arc<InstructionStore>,
    /// Provider-shaped schemas for the executor's registry, precomputed at
    /// composition time.
    tool_schemas: Vec<serde_json::Value>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: ExecutionParams,
}

impl ExecuteStepUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        interaction: Arc<dyn UserInteractionPort>,
        instructions: Arc<InstructionStore>,
        tool_schemas: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            interaction,
            instructions,
            tool_schemas,
            conversation_logger: Arc::new(NoConversationLogger),
            params: ExecutionParams::default(),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Run `step` to completion or abandonment.
    pub async fn execute(
        &self,
        step: &Step,
        profile: &ProjectProfile,
        progress: &dyn BootstrapProgress,
    ) -> Result<StepOutcome, ExecuteStepError> {
        info!("Executing step: {}", truncate(step.as_str(), 100));

        let guidance = self.lookup_guidance(step).await?;
        let mut conversation = Conversation::seeded(
            Message::system(BootstrapPrompt::execution_system_with_guidance(
                &profile.project_type,
                &guidance,
            )),
            Message::user(BootstrapPrompt::execution_user(
                step.as_str(),
                &profile.technologies_display(),
            )),
        );

        let mut turns = 0usize;
        let mut turn = self.model_turn(&conversation, &mut turns).await?;

        'step: loop {
            if !turn.has_tool_calls() {
                info!("Step completed in {} turn(s): {}", turns, step);
                self.conversation_logger.log(ConversationEvent::new(
                    "step_completed",
                    serde_json::json!({ "step": step.as_str(), "turns": turns }),
                ));
                return Ok(StepOutcome::Completed { turns });
            }

            if let Some(text) = turn.content.take().filter(|t| !t.is_empty()) {
                conversation.push(Message::assistant(text));
            }

            let mut dispatched: HashSet<String> = HashSet::new();
            let mut pending: VecDeque<ToolCallRequest> = turn.tool_calls.drain(..).collect();

            while let Some(call) = pending.pop_front() {
                if dispatched.contains(&call.tool_name) {
                    debug!("Dropping repeated call to '{}' this turn", call.tool_name);
                    continue;
                }

                let Some(definition) = self.tool_executor.registry().find(&call.tool_name) else {
                    warn!("Model requested unknown tool '{}'", call.tool_name);
                    progress.on_tool_skipped(&call.tool_name, "unknown tool");
                    self.conversation_logger.log(ConversationEvent::new(
                        "tool_skipped",
                        serde_json::json!({
                            "tool": call.tool_name,
                            "reason": "unknown tool",
                        }),
                    ));
                    continue;
                };

                let arguments = match call.parse_arguments() {
                    Ok(args) => args,
                    Err(e) => {
                        warn!("Bad arguments for '{}': {}", call.tool_name, e);
                        progress.on_tool_skipped(&call.tool_name, &e.to_string());
                        self.conversation_logger.log(ConversationEvent::new(
                            "tool_skipped",
                            serde_json::json!({
                                "tool": call.tool_name,
                                "reason": e.to_string(),
                            }),
                        ));
                        continue;
                    }
                };

                dispatched.insert(call.tool_name.clone());

                if call.tool_name == tool::ASK {
                    let question = arguments.get_string("question").unwrap_or_default();
                    let answer = match self.interaction.ask(question).await {
                        Ok(answer) => answer,
                        Err(e) => {
                            // No user to answer is a handler failure, not a
                            // step failure; drop the question and move on.
                            warn!("Could not ask the user: {}", e);
                            progress.on_tool_skipped(tool::ASK, &e.to_string());
                            self.conversation_logger.log(ConversationEvent::new(
                                "tool_skipped",
                                serde_json::json!({
                                    "tool": tool::ASK,
                                    "reason": e.to_string(),
                                }),
                            ));
                            continue;
                        }
                    };
                    self.conversation_logger.log(ConversationEvent::new(
                        "user_asked",
                        serde_json::json!({ "question": question, "answer": answer }),
                    ));
                    progress.on_tool_dispatched(tool::ASK, true);
                    conversation.push(Message::assistant(question));
                    conversation.push(Message::user(answer));
                } else {
                    let result = self
                        .tool_executor
                        .execute(&call.tool_name, &arguments)
                        .await;
                    if !result.is_success() {
                        warn!("Tool '{}' failed: {}", call.tool_name, result.feedback_text());
                    }
                    progress.on_tool_dispatched(&call.tool_name, result.is_success());
                    self.conversation_logger.log(ConversationEvent::new(
                        "tool_dispatched",
                        serde_json::json!({
                            "tool": call.tool_name,
                            "success": result.is_success(),
                            "feedback": result.feedback_text(),
                        }),
                    ));
                    conversation.push(Message::function(&call.tool_name, result.feedback_text()));
                }

                if definition.is_informational() {
                    // The model needs this result before the rest of the
                    // batch stays meaningful; ask it to re-plan now.
                    if turns >= self.params.max_turns {
                        return Ok(self.abandon(step, turns));
                    }
                    let mut next = self.model_turn(&conversation, &mut turns).await?;
                    if !next.has_tool_calls() {
                        turn = next;
                        continue 'step;
                    }
                    if let Some(text) = next.content.take().filter(|t| !t.is_empty()) {
                        conversation.push(Message::assistant(text));
                    }
                    pending = next
                        .tool_calls
                        .into_iter()
                        .filter(|c| !dispatched.contains(&c.tool_name))
                        .collect();
                }
            }

            if turns >= self.params.max_turns {
                return Ok(self.abandon(step, turns));
            }
            turn = self.model_turn(&conversation, &mut turns).await?;
        }
    }

    /// Retrieve corpus guidance for the step. A too-short query is the
    /// model's problem, not ours — degrade to no guidance.
    async fn lookup_guidance(&self, step: &Step) -> Result<Vec<String>, ExecuteStepError> {
        let query = BootstrapPrompt::guidance_query(step.as_str());
        match self.instructions.search(&query).await {
            Ok(guidance) => {
                debug!(
                    "Retrieved {} guidance snippet(s) for step: {}",
                    guidance.len(),
                    step
                );
                Ok(guidance)
            }
            Err(InstructionStoreError::InvalidQuery(len)) => {
                warn!("Guidance query too short ({} chars); continuing without", len);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn model_turn(
        &self,
        conversation: &Conversation,
        turns: &mut usize,
    ) -> Result<ModelTurn, ExecuteStepError> {
        *turns += 1;
        debug!(
            "Model turn {} ({} messages in conversation)",
            turns,
            conversation.len()
        );
        let turn = self
            .gateway
            .complete(conversation, &self.tool_schemas, self.params.temperature)
            .await?;
        self.conversation_logger.log(ConversationEvent::new(
            "model_turn",
            serde_json::json!({
                "turn": *turns,
                "content": turn.text_content(),
                "tool_calls": turn
                    .tool_calls
                    .iter()
                    .map(|c| c.tool_name.as_str())
                    .collect::<Vec<_>>(),
            }),
        ));
        Ok(turn)
    }

    fn abandon(&self, step: &Step, turns: usize) -> StepOutcome {
        warn!(
            "Step abandoned after {} turn(s) (cap {}): {}",
            turns, self.params.max_turns, step
        );
        self.conversation_logger.log(ConversationEvent::new(
            "step_abandoned",
            serde_json::json!({ "step": step.as_str(), "turns": turns }),
        ));
        StepOutcome::Abandoned { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::embeddings::{EmbeddingError, EmbeddingPort};
    use crate::ports::interaction::InteractionError;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use bootsmith_domain::{
        DispatchKind, RetrievalConfig, ToolArguments, ToolDefinition, ToolRegistry, ToolResult,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockGateway {
        turns: Mutex<VecDeque<ModelTurn>>,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn new(turns: Vec<ModelTurn>) -> Self {
            Self {
                turns: Mutex::new(VecDeque::from(turns)),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
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
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.turns
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more turns".to_string()))
        }
    }

    struct MockToolExecutor {
        registry: ToolRegistry,
        executed: Mutex<Vec<String>>,
    }

    impl MockToolExecutor {
        fn new() -> Self {
            Self {
                registry: bootstrap_registry(),
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockToolExecutor {
        fn registry(&self) -> &ToolRegistry {
            &self.registry
        }

        async fn execute(&self, tool_name: &str, _arguments: &ToolArguments) -> ToolResult {
            self.executed.lock().unwrap().push(tool_name.to_string());
            ToolResult::success(tool_name, "mock output")
        }
    }

    struct MockInteraction {
        questions: Mutex<Vec<String>>,
    }

    impl MockInteraction {
        fn new() -> Self {
            Self {
                questions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserInteractionPort for MockInteraction {
        async fn ask(&self, question: &str) -> Result<String, InteractionError> {
            self.questions.lock().unwrap().push(question.to_string());
            Ok("typed answer".to_string())
        }
    }

    struct NullEmbeddings;

    #[async_trait]
    impl EmbeddingPort for NullEmbeddings {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }
    }

    fn bootstrap_registry() -> ToolRegistry {
        ToolRegistry::new()
            .register(ToolDefinition::new(
                tool::GET_FILE_STRUCTURE,
                "List files",
                DispatchKind::Informational,
            ))
            .register(ToolDefinition::new(
                tool::WRITE_TO_FILE,
                "Write a file",
                DispatchKind::Terminal,
            ))
            .register(ToolDefinition::new(
                tool::GET_FILE_CONTENTS,
                "Read a file",
                DispatchKind::Informational,
            ))
            .register(ToolDefinition::new(
                tool::INSTALL_NPM_PACKAGE,
                "Install a package",
                DispatchKind::Terminal,
            ))
            .register(ToolDefinition::new(
                tool::ASK,
                "Ask the user",
                DispatchKind::Informational,
            ))
    }

    async fn empty_store() -> Arc<InstructionStore> {
        let mut store = InstructionStore::new(Arc::new(NullEmbeddings), RetrievalConfig::default());
        store.load("").await.unwrap();
        Arc::new(store)
    }

    fn profile() -> ProjectProfile {
        ProjectProfile::new(
            "my-app",
            "web application",
            "A demo app",
            vec!["React".to_string()],
        )
    }

    fn call(name: &str, args: &str) -> ToolCallRequest {
        ToolCallRequest::new(name, args)
    }

    fn tool_turn(calls: Vec<ToolCallRequest>) -> ModelTurn {
        ModelTurn {
            content: None,
            tool_calls: calls,
        }
    }

    struct Fixture {
        gateway: Arc<MockGateway>,
        executor: Arc<MockToolExecutor>,
        interaction: Arc<MockInteraction>,
        use_case: ExecuteStepUseCase,
    }

    async fn fixture(turns: Vec<ModelTurn>) -> Fixture {
        let gateway = Arc::new(MockGateway::new(turns));
        let executor = Arc::new(MockToolExecutor::new());
        let interaction = Arc::new(MockInteraction::new());
        let use_case = ExecuteStepUseCase::new(
            gateway.clone(),
            executor.clone(),
            interaction.clone(),
            empty_store().await,
            vec![],
        );
        Fixture {
            gateway,
            executor,
            interaction,
            use_case,
        }
    }

    fn step() -> Step {
        Step::from("create config file for eslint")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_zero_call_first_turn_completes() {
        let f = fixture(vec![ModelTurn::from_text("Nothing to do here.")]).await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Completed { turns: 1 });
        assert!(f.executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_terminal_tool_then_completion() {
        let f = fixture(vec![
            tool_turn(vec![call(
                tool::WRITE_TO_FILE,
                r#"{"path":".eslintrc.json","contents":"{}"}"#,
            )]),
            ModelTurn::from_text("Created the config file."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Completed { turns: 2 });
        assert_eq!(f.executor.executed(), vec![tool::WRITE_TO_FILE.to_string()]);
    }

    #[tokio::test]
    async fn test_repeated_tool_name_dispatched_once_per_turn() {
        let f = fixture(vec![
            tool_turn(vec![
                call(tool::WRITE_TO_FILE, r#"{"path":"a","contents":"1"}"#),
                call(tool::WRITE_TO_FILE, r#"{"path":"b","contents":"2"}"#),
                call(tool::INSTALL_NPM_PACKAGE, r#"{"packageName":"eslint"}"#),
            ]),
            ModelTurn::from_text("Done."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(
            f.executor.executed(),
            vec![
                tool::WRITE_TO_FILE.to_string(),
                tool::INSTALL_NPM_PACKAGE.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_skipped_not_fatal() {
        let f = fixture(vec![
            tool_turn(vec![call("formatHardDrive", "{}")]),
            ModelTurn::from_text("Never mind."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Completed { turns: 2 });
        assert!(f.executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_skipped_not_fatal() {
        let f = fixture(vec![
            tool_turn(vec![
                call(tool::WRITE_TO_FILE, "not valid json"),
                call(tool::INSTALL_NPM_PACKAGE, r#"{"packageName":"react"}"#),
            ]),
            ModelTurn::from_text("Done."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert!(outcome.is_completed());
        // The malformed call never reached the executor; the rest of the
        // batch still ran.
        assert_eq!(
            f.executor.executed(),
            vec![tool::INSTALL_NPM_PACKAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_informational_tool_interrupts_batch() {
        // Turn 1 asks for a read and a write; the read interrupts, and the
        // model's replanned turn only repeats the read (filtered as already
        // dispatched) plus an install. The original write must be discarded.
        let f = fixture(vec![
            tool_turn(vec![
                call(tool::GET_FILE_CONTENTS, r#"{"path":"package.json"}"#),
                call(tool::WRITE_TO_FILE, r#"{"path":"a","contents":"1"}"#),
            ]),
            tool_turn(vec![
                call(tool::GET_FILE_CONTENTS, r#"{"path":"package.json"}"#),
                call(tool::INSTALL_NPM_PACKAGE, r#"{"packageName":"react"}"#),
            ]),
            ModelTurn::from_text("All set."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Completed { turns: 3 });
        assert_eq!(f.gateway.call_count(), 3);
        assert_eq!(
            f.executor.executed(),
            vec![
                tool::GET_FILE_CONTENTS.to_string(),
                tool::INSTALL_NPM_PACKAGE.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_informational_reply_with_no_calls_completes() {
        let f = fixture(vec![
            tool_turn(vec![call(tool::GET_FILE_STRUCTURE, "{}")]),
            ModelTurn::from_text("The structure looks fine already."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Completed { turns: 2 });
        assert_eq!(
            f.executor.executed(),
            vec![tool::GET_FILE_STRUCTURE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_ask_routes_to_user_interaction() {
        let f = fixture(vec![
            tool_turn(vec![call(
                tool::ASK,
                r#"{"question":"Which package manager do you use?"}"#,
            )]),
            ModelTurn::from_text("Thanks, proceeding with npm."),
        ])
        .await;

        let outcome = f.use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert!(outcome.is_completed());
        // `ask` goes to the user, never to the local tool executor.
        assert!(f.executor.executed().is_empty());
        assert_eq!(
            f.interaction.questions.lock().unwrap().as_slice(),
            ["Which package manager do you use?"]
        );
    }

    struct ClosedInteraction;

    #[async_trait]
    impl UserInteractionPort for ClosedInteraction {
        async fn ask(&self, _question: &str) -> Result<String, InteractionError> {
            Err(InteractionError::InputClosed)
        }
    }

    #[tokio::test]
    async fn test_failed_ask_skips_call_and_step_continues() {
        let gateway = Arc::new(MockGateway::new(vec![
            tool_turn(vec![call(tool::ASK, r#"{"question":"npm or yarn?"}"#)]),
            ModelTurn::from_text("No answer available; defaulting to npm."),
        ]));
        let executor = Arc::new(MockToolExecutor::new());
        let use_case = ExecuteStepUseCase::new(
            gateway.clone(),
            executor.clone(),
            Arc::new(ClosedInteraction),
            empty_store().await,
            vec![],
        );

        let outcome = use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        // The unanswerable question is dropped, not fatal.
        assert_eq!(outcome, StepOutcome::Completed { turns: 2 });
        assert_eq!(gateway.call_count(), 2);
        assert!(executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_turn_cap_abandons_step() {
        // The model never stops asking for writes.
        let turns: Vec<ModelTurn> = (0..10)
            .map(|i| {
                tool_turn(vec![call(
                    tool::WRITE_TO_FILE,
                    &format!(r#"{{"path":"f{}","contents":"x"}}"#, i),
                )])
            })
            .collect();
        let f = fixture(turns).await;
        let use_case = f
            .use_case
            .with_params(ExecutionParams::default().with_max_turns(3));

        let outcome = use_case.execute(&step(), &profile(), &NoProgress).await.unwrap();

        assert_eq!(outcome, StepOutcome::Abandoned { turns: 3 });
        assert_eq!(f.gateway.call_count(), 3);
        assert_eq!(f.executor.executed().len(), 3);
    }

    #[tokio::test]
    async fn test_gateway_error_aborts_step() {
        let f = fixture(vec![]).await;

        let result = f.use_case.execute(&step(), &profile(), &NoProgress).await;

        assert!(matches!(result, Err(ExecuteStepError::Gateway(_))));
    }
}
