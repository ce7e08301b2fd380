use clap::Parser;

/// Infonex — chat with tool-calling AI models from your terminal.
#[derive(Parser, Debug)]
#[command(name = "infonex", version, about)]
pub struct Args {
    /// Model to chat with (e.g. "gpt-4o", "gpt-4o-mini", "deepseek").
    #[arg(short, long)]
    pub model: Option<String>,

    /// Disable tool calling for this session.
    #[arg(long)]
    pub no_tools: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter override (e.g. "infonex=debug").
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
