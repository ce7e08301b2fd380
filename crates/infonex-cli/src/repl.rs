//! Interactive chat loop.
//!
//! One session per process. Ctrl-C during a turn cancels the turn at
//! its next checkpoint instead of killing the process; the loop then
//! waits for the next prompt.

use std::io::Write as _;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use infonex_chat::{
    Backend, ChatError, Content, ContentPart, Message, ModelRouter, Orchestrator, TurnRequest,
    UsageTracker,
};
use infonex_common::SessionId;
use infonex_config::InfonexConfig;

use crate::cli::Args;

const HELP: &str = "\
commands:
  :help                 show this help
  :image <path> <text>  send a prompt with an attached image
  :usage                show token usage for this session
  :quit                 exit";

pub async fn run(
    orchestrator: Orchestrator,
    router: Arc<ModelRouter>,
    config: &InfonexConfig,
    usage: Arc<UsageTracker>,
    args: &Args,
) -> std::io::Result<()> {
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.chat.default_model.clone());
    let backend: Backend = router.resolve(&model);
    let tools_enabled = config.chat.tools_enabled && !args.no_tools;

    let session = SessionId::new();
    let mut history: Vec<Message> = Vec::new();
    if !config.chat.system_prompt.is_empty() {
        history.push(Message::system(config.chat.system_prompt.clone()));
    }

    println!("Infonex — chatting with {model} ({backend}). :help for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" | ":exit" => break,
            ":help" => {
                println!("{HELP}");
                continue;
            }
            ":usage" => {
                print_usage(&usage);
                continue;
            }
            _ => {}
        }

        let message = if let Some(rest) = line.strip_prefix(":image ") {
            match image_message(rest) {
                Ok(message) => message,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            }
        } else if line.starts_with(':') {
            eprintln!("unknown command: {line} (:help for commands)");
            continue;
        } else {
            Message::user(line)
        };

        history.push(message);

        let cancel = CancellationToken::new();
        let request = TurnRequest {
            backend,
            history: history.clone(),
            tools_enabled,
            session_id: Some(session.clone()),
        };

        let turn = orchestrator.run_turn(request, &cancel);
        tokio::pin!(turn);
        let result = loop {
            tokio::select! {
                result = &mut turn => break result,
                _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                    eprintln!("(cancelling)");
                    cancel.cancel();
                }
            }
        };

        match result {
            Ok(outcome) => {
                println!("{}", render_reply(&outcome.message.content));
                history.push(outcome.message);
            }
            Err(ChatError::Cancelled) => {
                eprintln!("turn cancelled");
            }
            Err(e) => {
                eprintln!("error: {e}");
            }
        }
    }

    Ok(())
}

fn print_usage(usage: &UsageTracker) {
    let snapshot = usage.snapshot();
    println!(
        "{} calls, {} prompt + {} completion = {} tokens",
        snapshot.calls,
        snapshot.total.prompt_tokens,
        snapshot.total.completion_tokens,
        snapshot.total.total(),
    );
    let mut backends: Vec<_> = snapshot.by_backend.iter().collect();
    backends.sort_by_key(|(backend, _)| backend.to_string());
    for (backend, tokens) in backends {
        println!("  {backend}: {} tokens", tokens.total());
    }
}

/// Build a user message from `:image <path> <prompt>` input.
fn image_message(rest: &str) -> Result<Message, String> {
    let (path, prompt) = match rest.split_once(' ') {
        Some((path, prompt)) if !prompt.trim().is_empty() => (path, prompt.trim()),
        _ => return Err("usage: :image <path> <text>".to_string()),
    };
    let mime = match path.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => return Err(format!("unsupported image type: {path}")),
    };
    let bytes = std::fs::read(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let url = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
    Ok(Message::user(Content::from_parts(vec![
        ContentPart::Text {
            text: prompt.to_string(),
        },
        ContentPart::ImageRef { url },
    ])))
}

fn render_reply(content: &Content) -> String {
    match content {
        Content::Text(text) => text.clone(),
        Content::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => text.clone(),
                ContentPart::ImageRef { url } => format!("[image] {}", truncate(url, 96)),
                ContentPart::PdfRef { url, title } => format!("[pdf] {title}: {url}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}
