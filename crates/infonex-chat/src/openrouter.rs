//! OpenRouter client for the reasoning backend (DeepSeek R1).
//!
//! Speaks the same chat-completions dialect as `openai.rs` but never
//! advertises tools: the reasoning models ignore them, so the catalog
//! is dropped here rather than sent and silently discarded upstream.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::content::render_history;
use crate::{ChatRequest, ModelClient, ProviderError, ProviderResponse, TokenUsage};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter API client configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: String,
    /// `X-Title` attribution header.
    pub title: String,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "deepseek/deepseek-r1".to_string(),
            referer: String::new(),
            title: "Infonex".to_string(),
        }
    }

    /// Create config from the `OPENROUTER_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ProviderError> {
        let key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ProviderError::Auth("OPENROUTER_API_KEY is not set".into()))?;
        Ok(Self::new(key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// OpenRouter chat client. Tool-free by design of the backend it fronts.
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    http: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn build_request_body(&self, request: &ChatRequest<'_>) -> Value {
        if !request.tools.is_empty() {
            debug!(
                model = %self.config.model,
                dropped = request.tools.len(),
                "reasoning backend does not take tools, dropping catalog"
            );
        }
        json!({
            "model": self.config.model,
            "messages": render_history(request.messages),
        })
    }

    /// Parse a response body. R1-style models sometimes put the entire
    /// answer in `reasoning` and leave `content` empty; use it as a
    /// fallback before declaring the response empty. Tool calls are
    /// never surfaced from this backend.
    fn parse_response(&self, json: Value) -> Result<ProviderResponse, ProviderError> {
        let message = &json["choices"][0]["message"];

        let mut content = message["content"].as_str().unwrap_or_default().to_string();
        if content.is_empty() {
            content = message["reasoning"].as_str().unwrap_or_default().to_string();
        }
        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        let usage = TokenUsage {
            prompt_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok(ProviderResponse {
            content,
            tool_calls: Vec::new(),
            usage,
        })
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_chat(
        &self,
        request: ChatRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::Auth("OPENROUTER_API_KEY is not set".into()));
        }

        let body = self.build_request_body(&request);

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            "reasoning request"
        );

        let mut builder = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .header("X-Title", &self.config.title);
        if !self.config.referer.is_empty() {
            builder = builder.header("HTTP-Referer", &self.config.referer);
        }

        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!("HTTP {status}: {text}")));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("HTTP {status}: {text}")));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("invalid response body: {e}")))?;

        self.parse_response(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, ToolDescriptor};

    fn client() -> OpenRouterClient {
        OpenRouterClient::new(OpenRouterConfig::new("or-test"))
    }

    #[test]
    fn body_never_carries_tools() {
        let messages = vec![Message::user("think about this")];
        let tools = vec![ToolDescriptor {
            name: "web_search".into(),
            description: "search".into(),
            parameters: json!({ "type": "object" }),
        }];
        let body = client().build_request_body(&ChatRequest {
            messages: &messages,
            tools: &tools,
        });
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
        assert_eq!(body["model"], "deepseek/deepseek-r1");
    }

    #[test]
    fn parse_plain_content() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": { "content": "deep answer" } }],
                "usage": { "prompt_tokens": 7, "completion_tokens": 42 }
            }))
            .unwrap();
        assert_eq!(response.content, "deep answer");
        assert_eq!(response.usage.completion_tokens, 42);
    }

    #[test]
    fn parse_falls_back_to_reasoning_field() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": {
                    "content": "",
                    "reasoning": "chain of thought"
                }}]
            }))
            .unwrap();
        assert_eq!(response.content, "chain of thought");
    }

    #[test]
    fn parse_never_surfaces_tool_calls() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": {
                    "content": "fine",
                    "tool_calls": [{
                        "id": "call_x",
                        "function": { "name": "web_search", "arguments": "{}" }
                    }]
                }}]
            }))
            .unwrap();
        assert!(response.tool_calls.is_empty());
    }

    #[test]
    fn parse_empty_is_error() {
        let err = client()
            .parse_response(json!({
                "choices": [{ "message": { "content": "" } }]
            }))
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn empty_key_fails_before_network() {
        let client = OpenRouterClient::new(OpenRouterConfig::new(""));
        let messages = vec![Message::user("hi")];
        let err = client
            .send_chat(ChatRequest {
                messages: &messages,
                tools: &[],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Auth(_)));
    }
}
