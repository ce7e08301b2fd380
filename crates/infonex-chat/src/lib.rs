//! Conversation core for Infonex.
//!
//! Holds the message/content data model, the provider clients (OpenAI
//! chat backends plus DeepSeek reasoning via OpenRouter), the tool
//! catalog with its executor, and the orchestrator that runs the bounded
//! tool-calling loop producing one assistant reply per user turn.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod content;
pub mod openai;
pub mod openrouter;
pub mod orchestrator;
pub mod router;
pub mod store;
pub mod tools;
pub mod usage;

pub use orchestrator::{Orchestrator, TurnRequest, TurnResult};
pub use router::ModelRouter;
pub use store::{MemoryStore, SessionStore, StoreError};
pub use tools::{ToolExecutor, ToolRegistry};
pub use usage::{UsageSink, UsageTracker};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }
}

/// One part of a multimodal message body.
///
/// `ImageRef` carries either an HTTPS URL or a `data:` URI; nothing here
/// validates or fetches it. `PdfRef` keeps the link plus a display title
/// so a rendered document survives history replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageRef { url: String },
    PdfRef { url: String, title: String },
}

/// Message body: plain text, or an ordered list of parts when non-text
/// content is present.
///
/// Invariants: `Parts` is never an empty list, and a body with no
/// non-text parts is always the `Text` form. Build via
/// [`Content::from_parts`] to keep both holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Canonicalizing constructor: a list without non-text parts
    /// collapses to the `Text` form (parts joined with newlines), so
    /// equal bodies compare equal regardless of how a provider shaped
    /// them.
    pub fn from_parts(parts: Vec<ContentPart>) -> Self {
        let all_text = parts
            .iter()
            .all(|part| matches!(part, ContentPart::Text { .. }));
        if all_text {
            let joined = parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text { text } => text.as_str(),
                    _ => "",
                })
                .collect::<Vec<_>>()
                .join("\n");
            return Content::Text(joined);
        }
        Content::Parts(parts)
    }

    /// All text in the body, parts joined with newlines.
    pub fn joined_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(text) => text.is_empty(),
            Content::Parts(parts) => parts.is_empty(),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

/// Tool invocation requested by the model.
///
/// `arguments` stays as the raw JSON text from the wire; the executor
/// parses it defensively so malformed output never aborts a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// What one tool execution hands back, keyed to the call that asked for
/// it. Failures are carried here as explanatory text, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
}

/// One catalog entry advertised to providers. `parameters` is a JSON
/// Schema object in the OpenAI function format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Chat message, the unit of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
    /// Model that produced an assistant message, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Set on tool-role messages: which call this result answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Set on assistant messages that requested tool invocations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
}

impl Message {
    fn new(role: Role, content: Content) -> Self {
        Self {
            role,
            content,
            model: None,
            timestamp: Utc::now(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    pub fn user(content: impl Into<Content>) -> Self {
        Self::new(Role::User, content.into())
    }

    pub fn assistant(content: impl Into<Content>) -> Self {
        Self::new(Role::Assistant, content.into())
    }

    pub fn system(content: impl Into<Content>) -> Self {
        Self::new(Role::System, content.into())
    }

    /// Tool-role message carrying one execution result back to the model.
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        let mut message = Self::new(Role::Tool, Content::Text(content.into()));
        message.tool_call_id = Some(tool_call_id.into());
        message
    }

    /// Assistant message that requested tool calls, with whatever lead
    /// text accompanied them.
    pub fn assistant_with_calls(content: impl Into<Content>, calls: Vec<ToolCallRequest>) -> Self {
        let mut message = Self::new(Role::Assistant, content.into());
        message.tool_calls = calls;
        message
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Token counts reported by a provider for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Which model endpoint a turn is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Day-to-day chat (GPT-4o class).
    Primary,
    /// Cheaper model for rewrites and summaries.
    Refinement,
    /// DeepSeek via OpenRouter. No tool calling.
    Reasoning,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Primary => "primary",
            Backend::Refinement => "refinement",
            Backend::Reasoning => "reasoning",
        };
        write!(f, "{name}")
    }
}

/// Borrowed request handed to a [`ModelClient`] for one round.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
    /// Tool catalog to advertise. Empty means the model is offered no
    /// tools for this round.
    pub tools: &'a [ToolDescriptor],
}

/// What a provider returned for one round. `content` and `tool_calls`
/// may both be populated; both empty is a provider error.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
    pub usage: TokenUsage,
}

/// Provider-level failure. Every variant is fatal for the current turn;
/// retry and backoff policy belong to callers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Missing or rejected credential. Raised before any network call
    /// when the key is absent.
    #[error("auth error: {0}")]
    Auth(String),

    #[error("rate limited")]
    RateLimited,

    /// The provider answered with neither content nor tool calls.
    #[error("empty response from provider")]
    EmptyResponse,

    #[error("network error: {0}")]
    Transport(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Turn-level failure surfaced by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("turn cancelled")]
    Cancelled,

    /// Internal marker: the round cap was hit while the model still
    /// wanted tools. Converted into a terminal user-visible message at
    /// the turn boundary, so callers normally never see it.
    #[error("tool round limit reached after {0} rounds")]
    RoundLimit(u32),

    #[error("no client registered for backend {0}")]
    NoBackend(Backend),
}

/// Provider seam. One implementation per upstream endpoint; the target
/// model is client configuration, not request state.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier requests are issued with.
    fn model(&self) -> &str;

    async fn send_chat(&self, request: ChatRequest<'_>)
        -> Result<ProviderResponse, ProviderError>;
}
