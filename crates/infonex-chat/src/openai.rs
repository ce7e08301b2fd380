//! OpenAI chat-completions client.
//!
//! Implements the `ModelClient` trait for the primary and refinement
//! backends; both are instances of this client configured with
//! different models.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::content::render_history;
use crate::tools::to_openai_tool;
use crate::{ChatRequest, ModelClient, ProviderError, ProviderResponse, TokenUsage, ToolCallRequest};
use infonex_common::new_tool_call_id;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    /// Create config from the `OPENAI_API_KEY` environment variable.
    /// Fails before any network traffic when the key is missing.
    pub fn from_env() -> Result<Self, ProviderError> {
        let key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ProviderError::Auth("OPENAI_API_KEY is not set".into()))?;
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

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    config: OpenAiConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Build the JSON request body. Tools and `tool_choice` are attached
    /// only when the round advertises a catalog.
    fn build_request_body(&self, request: &ChatRequest<'_>) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": render_history(request.messages),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        if !request.tools.is_empty() {
            let tool_defs: Vec<Value> = request.tools.iter().map(to_openai_tool).collect();
            body["tools"] = Value::Array(tool_defs);
            body["tool_choice"] = json!("auto");
        }

        body
    }

    /// Parse a chat-completions response body.
    fn parse_response(&self, json: Value) -> Result<ProviderResponse, ProviderError> {
        let message = &json["choices"][0]["message"];

        let content = message["content"].as_str().unwrap_or_default().to_string();

        let tool_calls: Vec<ToolCallRequest> = message["tool_calls"]
            .as_array()
            .map(|calls| calls.iter().map(parse_tool_call).collect())
            .unwrap_or_default();

        if content.is_empty() && tool_calls.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        let usage = TokenUsage {
            prompt_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok(ProviderResponse {
            content,
            tool_calls,
            usage,
        })
    }
}

/// One entry of `message.tool_calls`. Arguments stay raw text; a missing
/// id gets a generated one so the tool-role reply can still reference it.
fn parse_tool_call(call: &Value) -> ToolCallRequest {
    let arguments = match &call["function"]["arguments"] {
        Value::String(s) => s.clone(),
        Value::Null => "{}".to_string(),
        // Some gateways inline the object instead of string-encoding it.
        other => other.to_string(),
    };
    ToolCallRequest {
        id: call["id"]
            .as_str()
            .map(String::from)
            .unwrap_or_else(new_tool_call_id),
        name: call["function"]["name"].as_str().unwrap_or("").to_string(),
        arguments,
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_chat(
        &self,
        request: ChatRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::Auth("OPENAI_API_KEY is not set".into()));
        }

        let body = self.build_request_body(&request);

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "chat completion request"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
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

    fn client() -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("sk-test").with_model("gpt-4o"))
    }

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.into(),
            description: "a tool".into(),
            parameters: json!({ "type": "object", "properties": {} }),
        }
    }

    #[test]
    fn body_without_tools_omits_tool_choice() {
        let messages = vec![Message::system("be brief"), Message::user("hi")];
        let request = ChatRequest {
            messages: &messages,
            tools: &[],
        };
        let body = client().build_request_body(&request);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn body_with_tools_sets_auto_choice() {
        let messages = vec![Message::user("search something")];
        let tools = vec![descriptor("web_search")];
        let request = ChatRequest {
            messages: &messages,
            tools: &tools,
        };
        let body = client().build_request_body(&request);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "web_search");
    }

    #[test]
    fn parse_plain_content() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": { "content": "hello there" } }],
                "usage": { "prompt_tokens": 10, "completion_tokens": 3 }
            }))
            .unwrap();
        assert_eq!(response.content, "hello there");
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.usage.prompt_tokens, 10);
        assert_eq!(response.usage.completion_tokens, 3);
    }

    #[test]
    fn parse_tool_calls_keeps_raw_arguments() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "get_weather",
                            "arguments": "{\"location\":\"Paris\"}"
                        }
                    }]
                }}]
            }))
            .unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].id, "call_abc");
        assert_eq!(response.tool_calls[0].name, "get_weather");
        assert_eq!(response.tool_calls[0].arguments, "{\"location\":\"Paris\"}");
    }

    #[test]
    fn parse_generates_id_when_missing() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": {
                    "tool_calls": [{
                        "function": { "name": "flip_coin", "arguments": "{}" }
                    }]
                }}]
            }))
            .unwrap();
        assert!(response.tool_calls[0].id.starts_with("call_"));
    }

    #[test]
    fn parse_inlined_argument_object_is_reencoded() {
        let response = client()
            .parse_response(json!({
                "choices": [{ "message": {
                    "tool_calls": [{
                        "id": "call_1",
                        "function": { "name": "calculate", "arguments": { "a": 1 } }
                    }]
                }}]
            }))
            .unwrap();
        let parsed: Value = serde_json::from_str(&response.tool_calls[0].arguments).unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn parse_empty_message_is_error() {
        let err = client()
            .parse_response(json!({
                "choices": [{ "message": { "content": "" } }]
            }))
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[test]
    fn parse_missing_choices_is_error() {
        let err = client().parse_response(json!({})).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn empty_key_fails_before_network() {
        let client = OpenAiClient::new(OpenAiConfig::new(""));
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
