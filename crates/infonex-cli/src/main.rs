mod cli;
mod repl;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use infonex_chat::openai::{OpenAiClient, OpenAiConfig};
use infonex_chat::openrouter::{OpenRouterClient, OpenRouterConfig};
use infonex_chat::tools::builtin_executor;
use infonex_chat::tools::services::{
    OpenAiImageClient, PdfServiceClient, SerperClient, ToolServices,
};
use infonex_chat::{Backend, MemoryStore, ModelRouter, Orchestrator, ToolRegistry, UsageTracker};
use infonex_config::InfonexConfig;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root, two levels up from crates/infonex-cli/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn load_config(args: &cli::Args) -> InfonexConfig {
    let loaded = match &args.config {
        Some(path) => infonex_config::load_config_from(std::path::Path::new(path)),
        None => infonex_config::load_config(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("config load failed, using defaults: {e}");
        InfonexConfig::default()
    });
    infonex_config::apply_env_overrides(&mut config);
    config
}

#[tokio::main]
async fn main() {
    // Load .env before reading any keys
    load_dotenv();

    let args = cli::parse();
    let config = load_config(&args);

    // Initialize logging
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "infonex=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Infonex v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }

    // Provider clients: two OpenAI instances plus the reasoning backend
    let primary = OpenAiClient::new(
        OpenAiConfig::new(config.openai.api_key.clone())
            .with_base_url(config.openai.base_url.clone())
            .with_model(config.openai.chat_model.clone())
            .with_max_tokens(config.openai.max_tokens)
            .with_temperature(config.openai.temperature),
    );
    let refinement = OpenAiClient::new(
        OpenAiConfig::new(config.openai.api_key.clone())
            .with_base_url(config.openai.base_url.clone())
            .with_model(config.openai.refine_model.clone())
            .with_max_tokens(config.openai.max_tokens)
            .with_temperature(config.openai.temperature),
    );
    let reasoning = OpenRouterClient::new(
        OpenRouterConfig::new(config.openrouter.api_key.clone())
            .with_base_url(config.openrouter.base_url.clone())
            .with_model(config.openrouter.reasoning_model.clone())
            .with_referer(config.openrouter.referer.clone())
            .with_title(config.openrouter.title.clone()),
    );

    let mut router = ModelRouter::new();
    router.register_client(Backend::Primary, Arc::new(primary));
    router.register_client(Backend::Refinement, Arc::new(refinement));
    router.register_client(Backend::Reasoning, Arc::new(reasoning));
    router.register_alias(config.openai.chat_model.clone(), Backend::Primary);
    router.register_alias(config.openai.refine_model.clone(), Backend::Refinement);
    router.register_alias(config.openrouter.reasoning_model.clone(), Backend::Reasoning);
    router.register_alias("deepseek", Backend::Reasoning);
    let router = Arc::new(router);

    // Tool catalog and handlers
    let services = ToolServices {
        search: Arc::new(SerperClient::new(
            config.search.api_key.clone(),
            config.search.endpoint.clone(),
        )),
        images: Arc::new(
            OpenAiImageClient::new(config.openai.api_key.clone())
                .with_base_url(config.openai.base_url.clone())
                .with_model(config.openai.image_model.clone()),
        ),
        pdf: Arc::new(PdfServiceClient::new(config.artifacts.pdf_service_url.clone())),
    };
    let registry = Arc::new(ToolRegistry::builtin());
    let executor = builtin_executor(&services, &config.artifacts.image_size);
    executor
        .validate_catalog(&registry)
        .expect("builtin catalog and handlers out of sync");
    tracing::info!(tools = registry.len(), "tool catalog ready");

    let usage = Arc::new(UsageTracker::new());
    let orchestrator = Orchestrator::new(router.clone(), registry, Arc::new(executor))
        .with_max_rounds(config.chat.max_tool_rounds)
        .with_store(Arc::new(MemoryStore::new()))
        .with_usage(usage.clone());

    if let Err(e) = repl::run(orchestrator, router, &config, usage, &args).await {
        tracing::error!("repl error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
