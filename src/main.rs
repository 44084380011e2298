//! motion-mcp-server - exposes the Motion API as MCP tools over stdio.
//!
//! stdout carries the protocol; logs go to stderr.

use anyhow::Context;
use motion_config::{Config, auth, env};
use tokio::io::BufReader;
use tracing::info;

fn log_filter() -> tracing_subscriber::EnvFilter {
    let level = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| env::process_env(env::LOG_LEVEL))
        .unwrap_or_else(|| "warn".to_string());

    tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before the filter reads MOTION_LOG_LEVEL.
    let dotenv = env::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = Config::load().context("failed to load configuration")?;
    let api_key = auth::resolve_api_key(&config)?;
    let server = motion::build_server(&config, api_key).context("failed to build API client")?;

    info!(
        base_url = %config.base_url,
        cap = server.handler().client().queue().cap(),
        "Motion MCP server started"
    );
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
