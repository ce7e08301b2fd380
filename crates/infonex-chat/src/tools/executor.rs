//! Tool execution.
//!
//! Every path through the executor returns a `ToolResult`: a bad
//! argument payload, an unknown tool name or a handler failure all
//! become result text the model can read and react to on the next
//! round. Nothing in here aborts the surrounding turn.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::tools::ToolRegistry;
use crate::{ToolCallRequest, ToolResult};

/// A tool implementation failed. This is folded into result text,
/// never propagated as a turn error.
#[derive(Debug, Error)]
pub enum ToolFailure {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument {0}: {1}")]
    InvalidArgument(&'static str, String),
    #[error("{0}")]
    Upstream(String),
}

/// One runnable tool. Handlers receive already-parsed argument JSON.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure>;
}

/// Catalog/handler mismatch found at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tool '{0}' is advertised but has no handler")]
    MissingHandler(String),
    #[error("tool '{0}' has a handler but is not advertised")]
    MissingDescriptor(String),
}

/// Runs tool calls against registered handlers.
pub struct ToolExecutor {
    handlers: HashMap<&'static str, Box<dyn ToolHandler>>,
}

impl ToolExecutor {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under a tool name. A later registration for
    /// the same name replaces the earlier one.
    pub fn register(&mut self, name: &'static str, handler: Box<dyn ToolHandler>) {
        self.handlers.insert(name, handler);
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Check that the advertised catalog and the handler table agree
    /// in both directions.
    pub fn validate_catalog(&self, registry: &ToolRegistry) -> Result<(), CatalogError> {
        for tool in registry.descriptors() {
            if !self.handlers.contains_key(tool.name.as_str()) {
                return Err(CatalogError::MissingHandler(tool.name.clone()));
            }
        }
        for name in self.handlers.keys() {
            if registry.get(name).is_none() {
                return Err(CatalogError::MissingDescriptor((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Execute one call. Always produces a result keyed to the call id.
    pub async fn execute(&self, call: &ToolCallRequest) -> ToolResult {
        debug!(tool = %call.name, id = %call.id, "executing tool");

        let raw = if call.arguments.trim().is_empty() {
            "{}"
        } else {
            call.arguments.as_str()
        };
        let args: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "malformed tool arguments");
                return ToolResult {
                    tool_call_id: call.id.clone(),
                    content: format!("invalid arguments for {}: {e}", call.name),
                };
            }
        };

        let content = match self.handlers.get(call.name.as_str()) {
            None => {
                warn!(tool = %call.name, "unknown tool requested");
                format!("unknown tool: {}", call.name)
            }
            Some(handler) => match handler.run(&args).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "tool failed");
                    format!("{} failed: {e}", call.name)
                }
            },
        };

        ToolResult {
            tool_call_id: call.id.clone(),
            content,
        }
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolDescriptor;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
            Ok(format!("echo: {}", args["text"].as_str().unwrap_or("")))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl ToolHandler for AlwaysFails {
        async fn run(&self, _args: &Value) -> Result<String, ToolFailure> {
            Err(ToolFailure::Upstream("backend unreachable".into()))
        }
    }

    fn call(name: &str, arguments: &str) -> ToolCallRequest {
        ToolCallRequest {
            id: "call_1".into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    fn executor() -> ToolExecutor {
        let mut executor = ToolExecutor::new();
        executor.register("echo", Box::new(Echo));
        executor
    }

    #[tokio::test]
    async fn runs_registered_handler() {
        let result = executor().execute(&call("echo", r#"{"text":"hi"}"#)).await;
        assert_eq!(result.tool_call_id, "call_1");
        assert_eq!(result.content, "echo: hi");
    }

    #[tokio::test]
    async fn empty_arguments_parse_as_empty_object() {
        let result = executor().execute(&call("echo", "")).await;
        assert_eq!(result.content, "echo: ");
    }

    #[tokio::test]
    async fn malformed_arguments_become_result_text() {
        let result = executor().execute(&call("echo", "{not json")).await;
        assert!(result.content.starts_with("invalid arguments for echo:"));
        assert!(!result.content.is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_becomes_result_text() {
        let result = executor().execute(&call("bogus", "{}")).await;
        assert_eq!(result.content, "unknown tool: bogus");
    }

    #[tokio::test]
    async fn handler_failure_becomes_result_text() {
        let mut executor = ToolExecutor::new();
        executor.register("breaks", Box::new(AlwaysFails));
        let result = executor.execute(&call("breaks", "{}")).await;
        assert_eq!(result.content, "breaks failed: backend unreachable");
    }

    #[test]
    fn catalog_validation_both_directions() {
        let executor = executor();

        let advertised = ToolRegistry::new(vec![ToolDescriptor {
            name: "echo".into(),
            description: "echo".into(),
            parameters: json!({ "type": "object" }),
        }]);
        assert!(executor.validate_catalog(&advertised).is_ok());

        let extra = ToolRegistry::new(vec![
            ToolDescriptor {
                name: "echo".into(),
                description: "echo".into(),
                parameters: json!({ "type": "object" }),
            },
            ToolDescriptor {
                name: "ghost".into(),
                description: "no handler".into(),
                parameters: json!({ "type": "object" }),
            },
        ]);
        assert!(matches!(
            executor.validate_catalog(&extra),
            Err(CatalogError::MissingHandler(name)) if name == "ghost"
        ));

        let none = ToolRegistry::empty();
        assert!(matches!(
            executor.validate_catalog(&none),
            Err(CatalogError::MissingDescriptor(name)) if name == "echo"
        ));
    }
}
