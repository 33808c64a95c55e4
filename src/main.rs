mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use companion::{config, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "companion", version, about = "Memory extraction and personality voices over a generative model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve,
    /// Start the MCP server (stdio transport)
    Mcp,
    /// Extract a memory profile from a JSON messages file (`-` for stdin)
    Extract { file: PathBuf },
    /// List available personalities
    Personalities,
    /// Answer a message in one personality's voice
    Transform {
        /// Personality key, e.g. `witty_friend`
        personality: String,
        message: String,
    },
    /// Answer a message in every personality's voice
    Compare { message: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::CompanionConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC and CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => server::serve_http(config).await?,
        Command::Mcp => server::serve_stdio(config).await?,
        Command::Extract { file } => cli::extract::extract(&config, &file).await?,
        Command::Personalities => cli::personalities::list()?,
        Command::Transform {
            personality,
            message,
        } => cli::personalities::transform(&config, &personality, &message).await?,
        Command::Compare { message } => cli::personalities::compare(&config, &message).await?,
    }

    Ok(())
}
