use std::sync::Arc;

use clap::Parser;
use taskbridge_mcp_runtime::{Gateway, RemoteArgs, run_stdio};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "taskbridge-mcp",
    version,
    about = "taskbridge MCP server: ClickUp tools over stdio"
)]
struct Cli {
    #[command(flatten)]
    remote: RemoteArgs,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // stdout carries protocol frames; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskbridge_mcp_runtime=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.remote.into_config();
    if config.token.is_none() {
        tracing::warn!("CLICKUP_API_TOKEN is not set; remote tools will fail until it is");
    }

    let code = run_stdio(Arc::new(Gateway::new(config))).await;
    std::process::exit(code);
}
