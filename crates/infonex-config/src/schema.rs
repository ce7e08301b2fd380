//! Configuration schema types for Infonex.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching current behavior.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// OpenAI Config
// =============================================================================

/// OpenAI API settings. Drives the primary chat backend, the refinement
/// backend, and image generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key. Usually left empty here and supplied via `OPENAI_API_KEY`.
    pub api_key: String,
    pub base_url: String,
    /// Model for the primary chat backend.
    pub chat_model: String,
    /// Model for the refinement backend (rewrites, summaries).
    pub refine_model: String,
    /// Model for the `generate_image` tool.
    pub image_model: String,
    /// Completion token cap per request (valid range: 256-16384).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".into(),
            chat_model: "gpt-4o".into(),
            refine_model: "gpt-4o-mini".into(),
            image_model: "dall-e-3".into(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

// =============================================================================
// OpenRouter Config
// =============================================================================

/// OpenRouter settings for the reasoning backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// API key. Usually supplied via `OPENROUTER_API_KEY`.
    pub api_key: String,
    pub base_url: String,
    pub reasoning_model: String,
    /// Sent as `HTTP-Referer` (OpenRouter app attribution).
    pub referer: String,
    /// Sent as `X-Title`.
    pub title: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://openrouter.ai/api/v1".into(),
            reasoning_model: "deepseek/deepseek-r1".into(),
            referer: "https://github.com/dylan/infonex".into(),
            title: "Infonex".into(),
        }
    }
}

// =============================================================================
// Search Config
// =============================================================================

/// Serper web-search settings, used by the `web_search` and
/// `news_headlines` tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API key. Usually supplied via `SERPER_API_KEY`.
    pub api_key: String,
    pub endpoint: String,
    /// Results folded into a tool reply (valid range: 1-10).
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://google.serper.dev".into(),
            max_results: 5,
        }
    }
}

// =============================================================================
// Artifacts Config
// =============================================================================

/// Settings for generated artifacts (images, PDFs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Endpoint of the markdown-to-PDF render service. Empty disables
    /// the `generate_pdf` tool body (calls report the missing service).
    pub pdf_service_url: String,
    /// Image size requested from the image API (format: WIDTHxHEIGHT).
    pub image_size: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            pdf_service_url: String::new(),
            image_size: "1024x1024".into(),
        }
    }
}

// =============================================================================
// Chat Config
// =============================================================================

/// Conversation behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model alias selected when the user does not pick one.
    pub default_model: String,
    /// System preamble prepended to every conversation.
    pub system_prompt: String,
    /// Provider round cap per turn (valid range: 1-8).
    pub max_tool_rounds: u32,
    /// Advertise the tool catalog to the model.
    pub tools_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o".into(),
            system_prompt: "You are Infonex, a helpful assistant. Use the available tools \
                            when they help you answer. Be concise."
                .into(),
            max_tool_rounds: 3,
            tools_enabled: true,
        }
    }
}

// =============================================================================
// Logging Config
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive. `RUST_LOG` overrides it.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "infonex=info".into(),
        }
    }
}

// =============================================================================
// Root Config
// =============================================================================

/// Root configuration for Infonex.
///
/// All options have sensible defaults matching current behavior.
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct InfonexConfig {
    pub openai: OpenAiConfig,
    pub openrouter: OpenRouterConfig,
    pub search: SearchConfig,
    pub artifacts: ArtifactsConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
