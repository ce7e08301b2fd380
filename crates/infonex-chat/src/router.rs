//! Model router — maps model names onto backends and backends onto
//! registered clients.
//!
//! The CLI accepts free-form model names ("gpt-4o", "deepseek", ...);
//! the router resolves them to one of the three backends and hands out
//! the client registered for it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Backend, ChatError, ModelClient};

/// Routes chat turns to registered backend clients.
pub struct ModelRouter {
    /// Registered clients by backend.
    clients: HashMap<Backend, Arc<dyn ModelClient>>,
    /// Model-name aliases ("gpt-4o" -> Primary, "deepseek" -> Reasoning).
    aliases: HashMap<String, Backend>,
    /// Backend used when no alias matches.
    default_backend: Backend,
}

impl ModelRouter {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            aliases: HashMap::new(),
            default_backend: Backend::Primary,
        }
    }

    /// Register a client for a backend.
    pub fn register_client(&mut self, backend: Backend, client: Arc<dyn ModelClient>) {
        self.clients.insert(backend, client);
    }

    /// Register a model-name alias. Aliases are matched case-insensitively,
    /// exact name first, then as substrings of the requested name.
    pub fn register_alias(&mut self, alias: impl Into<String>, backend: Backend) {
        self.aliases.insert(alias.into().to_lowercase(), backend);
    }

    pub fn set_default_backend(&mut self, backend: Backend) {
        self.default_backend = backend;
    }

    /// Resolve a model name to a backend. Longest alias wins on
    /// substring matches so "gpt-4o-mini" is not captured by "gpt-4o".
    pub fn resolve(&self, model: &str) -> Backend {
        let lowered = model.to_lowercase();
        if let Some(backend) = self.aliases.get(&lowered) {
            return *backend;
        }
        let mut candidates: Vec<(&String, &Backend)> = self.aliases.iter().collect();
        candidates.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.len()));
        for (alias, backend) in candidates {
            if lowered.contains(alias.as_str()) {
                return *backend;
            }
        }
        self.default_backend
    }

    /// Get the client registered for a backend.
    pub fn client_for(&self, backend: Backend) -> Result<Arc<dyn ModelClient>, ChatError> {
        self.clients
            .get(&backend)
            .cloned()
            .ok_or(ChatError::NoBackend(backend))
    }

    /// List the backends that currently have a client.
    pub fn backends(&self) -> Vec<Backend> {
        self.clients.keys().copied().collect()
    }
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChatRequest, ProviderError, ProviderResponse};
    use async_trait::async_trait;

    struct StubClient(&'static str);

    #[async_trait]
    impl ModelClient for StubClient {
        fn model(&self) -> &str {
            self.0
        }

        async fn send_chat(
            &self,
            _request: ChatRequest<'_>,
        ) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                content: "ok".into(),
                ..Default::default()
            })
        }
    }

    fn router() -> ModelRouter {
        let mut router = ModelRouter::new();
        router.register_alias("gpt-4o", Backend::Primary);
        router.register_alias("gpt-4o-mini", Backend::Refinement);
        router.register_alias("deepseek", Backend::Reasoning);
        router
    }

    #[test]
    fn exact_alias_wins() {
        let router = router();
        assert_eq!(router.resolve("gpt-4o"), Backend::Primary);
        assert_eq!(router.resolve("gpt-4o-mini"), Backend::Refinement);
    }

    #[test]
    fn substring_alias_prefers_longest() {
        let router = router();
        assert_eq!(router.resolve("openai/gpt-4o-mini-2024"), Backend::Refinement);
        assert_eq!(router.resolve("deepseek/deepseek-r1"), Backend::Reasoning);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let router = router();
        assert_eq!(router.resolve("DeepSeek"), Backend::Reasoning);
    }

    #[test]
    fn unknown_model_uses_default() {
        let mut router = router();
        assert_eq!(router.resolve("claude-sonnet"), Backend::Primary);
        router.set_default_backend(Backend::Reasoning);
        assert_eq!(router.resolve("claude-sonnet"), Backend::Reasoning);
    }

    #[test]
    fn client_lookup_errors_when_unregistered() {
        let mut router = router();
        assert!(matches!(
            router.client_for(Backend::Primary),
            Err(ChatError::NoBackend(Backend::Primary))
        ));
        router.register_client(Backend::Primary, Arc::new(StubClient("gpt-4o")));
        let client = router.client_for(Backend::Primary).unwrap();
        assert_eq!(client.model(), "gpt-4o");
    }
}
