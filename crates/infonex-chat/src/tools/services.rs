//! Outbound service ports used by the built-in tool handlers.
//!
//! Handlers depend on these traits, not on concrete HTTP clients, so
//! tests can substitute doubles and the executor stays network-free.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::executor::ToolFailure;

/// One web search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Web and news search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchHit>, ToolFailure>;
    async fn news(&self, topic: &str, max_results: usize) -> Result<Vec<SearchHit>, ToolFailure>;
}

/// Text-to-image generation. Returns a URL for the image, which may be
/// a `data:` URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ToolFailure>;
}

/// Markdown-to-PDF rendering. Returns a URL for the document.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, title: &str, markdown: &str) -> Result<String, ToolFailure>;
}

/// The service bundle handed to the built-in handlers.
#[derive(Clone)]
pub struct ToolServices {
    pub search: Arc<dyn SearchProvider>,
    pub images: Arc<dyn ImageGenerator>,
    pub pdf: Arc<dyn PdfRenderer>,
}

// ===== Serper search =====

/// Search client for the Serper API.
pub struct SerperClient {
    api_key: String,
    endpoint: String,
    http: reqwest::Client,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ToolFailure> {
        if self.api_key.is_empty() {
            return Err(ToolFailure::Upstream(
                "search is not configured (missing API key)".into(),
            ));
        }
        debug!(path, "serper request");
        let response = self
            .http
            .post(format!("{}{path}", self.endpoint))
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("search request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(ToolFailure::Upstream(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("invalid search response: {e}")))
    }
}

/// Pull hits out of a Serper response array ("organic" or "news").
fn collect_hits(json: &Value, key: &str, max_results: usize) -> Vec<SearchHit> {
    json[key]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .take(max_results)
                .map(|entry| SearchHit {
                    title: entry["title"].as_str().unwrap_or("(untitled)").to_string(),
                    link: entry["link"].as_str().unwrap_or_default().to_string(),
                    snippet: entry["snippet"].as_str().unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ToolFailure> {
        let json = self
            .post("/search", json!({ "q": query, "num": max_results }))
            .await?;
        Ok(collect_hits(&json, "organic", max_results))
    }

    async fn news(&self, topic: &str, max_results: usize) -> Result<Vec<SearchHit>, ToolFailure> {
        let json = self
            .post("/news", json!({ "q": topic, "num": max_results }))
            .await?;
        Ok(collect_hits(&json, "news", max_results))
    }
}

// ===== OpenAI image generation =====

/// Image generation via the OpenAI images endpoint.
pub struct OpenAiImageClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAiImageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "dall-e-3".to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ToolFailure> {
        if self.api_key.is_empty() {
            return Err(ToolFailure::Upstream(
                "image generation is not configured (missing API key)".into(),
            ));
        }
        debug!(model = %self.model, size, "image generation request");
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": size,
            "response_format": "b64_json",
        });
        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("image request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(ToolFailure::Upstream(format!(
                "image generation returned HTTP {}",
                response.status()
            )));
        }
        let json: Value = response
            .json()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("invalid image response: {e}")))?;

        if let Some(b64) = json["data"][0]["b64_json"].as_str() {
            return Ok(format!("data:image/png;base64,{b64}"));
        }
        if let Some(url) = json["data"][0]["url"].as_str() {
            return Ok(url.to_string());
        }
        Err(ToolFailure::Upstream(
            "image response had no image data".into(),
        ))
    }
}

// ===== PDF rendering service =====

/// Client for the external markdown-to-PDF rendering service.
pub struct PdfServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl PdfServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PdfRenderer for PdfServiceClient {
    async fn render(&self, title: &str, markdown: &str) -> Result<String, ToolFailure> {
        if self.base_url.is_empty() {
            return Err(ToolFailure::Upstream(
                "pdf rendering is not configured".into(),
            ));
        }
        debug!(title, "pdf render request");
        let response = self
            .http
            .post(format!("{}/render", self.base_url))
            .json(&json!({ "title": title, "markdown": markdown }))
            .send()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("pdf request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(ToolFailure::Upstream(format!(
                "pdf service returned HTTP {}",
                response.status()
            )));
        }
        let json: Value = response
            .json()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("invalid pdf response: {e}")))?;
        json["url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ToolFailure::Upstream("pdf response had no document URL".into()))
    }
}
