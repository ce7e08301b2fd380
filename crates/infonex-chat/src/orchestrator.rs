//! Conversation orchestration.
//!
//! Drives one user turn end to end: send the history to the selected
//! backend, execute whatever tools the model asks for, feed the results
//! back, and repeat until the model answers in plain text, an artifact
//! tool short-circuits the loop, or the round cap is hit.
//!
//! The orchestrator owns its working copy of the history. Tool rounds
//! grow that copy; the caller's transcript is never mutated here.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::content::{compose_artifact, compose_text, parse_artifact, Artifact};
use crate::router::ModelRouter;
use crate::store::SessionStore;
use crate::tools::executor::ToolExecutor;
use crate::tools::ToolRegistry;
use crate::usage::{NoopUsage, UsageSink};
use crate::{
    Backend, ChatError, ChatRequest, Content, Message, ModelClient, ProviderError, ToolDescriptor,
};
use infonex_common::SessionId;

/// Terminal reply when the model is still asking for tools at the cap.
pub const ROUND_LIMIT_MESSAGE: &str =
    "I couldn't finish working through the tools for this request. Please try again.";

/// One user turn to run.
pub struct TurnRequest {
    pub backend: Backend,
    /// Owned working copy of the transcript, latest user message last.
    pub history: Vec<Message>,
    pub tools_enabled: bool,
    /// When set together with a store, the final reply is persisted.
    pub session_id: Option<SessionId>,
}

/// What a completed turn produced.
#[derive(Debug)]
pub struct TurnResult {
    pub message: Message,
    pub rounds_used: u32,
}

/// Runs turns against the router, executing tools between rounds.
pub struct Orchestrator {
    router: Arc<ModelRouter>,
    registry: Arc<ToolRegistry>,
    executor: Arc<ToolExecutor>,
    max_rounds: u32,
    store: Option<Arc<dyn SessionStore>>,
    usage: Arc<dyn UsageSink>,
}

impl Orchestrator {
    pub fn new(
        router: Arc<ModelRouter>,
        registry: Arc<ToolRegistry>,
        executor: Arc<ToolExecutor>,
    ) -> Self {
        Self {
            router,
            registry,
            executor,
            max_rounds: 3,
            store: None,
            usage: Arc::new(NoopUsage),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_usage(mut self, usage: Arc<dyn UsageSink>) -> Self {
        self.usage = usage;
        self
    }

    /// Run one turn. Hitting the round cap is not an error at this
    /// boundary: it finalizes into [`ROUND_LIMIT_MESSAGE`] so the user
    /// always gets a reply from a turn the providers survived.
    pub async fn run_turn(
        &self,
        request: TurnRequest,
        cancel: &CancellationToken,
    ) -> Result<TurnResult, ChatError> {
        let client = self.router.client_for(request.backend)?;
        let session = request.session_id.clone();

        let (content, rounds_used) = match self.drive(&client, request, cancel).await {
            Ok(done) => done,
            Err(ChatError::RoundLimit(rounds)) => {
                warn!(rounds, "tool round limit reached, finalizing turn");
                (Content::text(ROUND_LIMIT_MESSAGE), rounds)
            }
            Err(e) => return Err(e),
        };

        let message = Message::assistant(content).with_model(client.model());

        if let (Some(store), Some(session)) = (&self.store, &session) {
            if let Err(e) = store.append_message(session, &message).await {
                warn!(error = %e, "failed to persist assistant message");
            }
        }

        Ok(TurnResult {
            message,
            rounds_used,
        })
    }

    async fn drive(
        &self,
        client: &Arc<dyn ModelClient>,
        request: TurnRequest,
        cancel: &CancellationToken,
    ) -> Result<(Content, u32), ChatError> {
        let TurnRequest {
            backend,
            mut history,
            tools_enabled,
            ..
        } = request;

        let tools: &[ToolDescriptor] = if tools_enabled {
            self.registry.descriptors()
        } else {
            &[]
        };

        debug!(
            backend = %backend,
            history = history.len(),
            tools = tools.len(),
            "starting turn"
        );

        let mut lead_texts: Vec<String> = Vec::new();
        let mut rounds: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(ChatError::Cancelled);
            }
            rounds += 1;

            let response = client
                .send_chat(ChatRequest {
                    messages: &history,
                    tools,
                })
                .await?;
            self.usage.record(backend, &response.usage);

            debug!(
                round = rounds,
                tool_calls = response.tool_calls.len(),
                "provider response"
            );

            // A disabled-tools turn finalizes here no matter what the
            // provider claimed to call.
            if response.tool_calls.is_empty() || !tools_enabled {
                let content = compose_text(&lead_texts, &response.content);
                if content.is_empty() {
                    return Err(ChatError::Provider(ProviderError::EmptyResponse));
                }
                return Ok((content, rounds));
            }

            if !response.content.is_empty() {
                lead_texts.push(response.content.clone());
            }
            history.push(Message::assistant_with_calls(
                Content::text(response.content),
                response.tool_calls.clone(),
            ));

            let mut artifact: Option<Artifact> = None;
            for call in &response.tool_calls {
                if cancel.is_cancelled() {
                    return Err(ChatError::Cancelled);
                }
                let result = self.executor.execute(call).await;
                if artifact.is_none() {
                    artifact = parse_artifact(&result.content);
                }
                history.push(Message::tool(result.content, result.tool_call_id));
            }

            // An artifact ends the turn even on the last allowed round.
            if let Some(artifact) = artifact {
                return Ok((compose_artifact(&lead_texts, &artifact), rounds));
            }

            if rounds >= self.max_rounds {
                return Err(ChatError::RoundLimit(rounds));
            }
        }
    }
}
