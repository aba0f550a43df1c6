//! Tool catalogue, remote client and transport-neutral dispatch for the
//! taskbridge gateway, plus the MCP stdio binding.

pub mod args;
pub mod client;
pub mod gateway;
pub mod hierarchy;
pub mod inputs;
pub mod members;
pub mod registry;
pub mod server;
pub mod tools;

mod util;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use args::RemoteArgs;
pub use gateway::Gateway;
pub use server::McpServer;
pub use tools::{ToolKind, ToolSummary};

/// Run the MCP server on stdin/stdout until the client disconnects.
/// Returns the process exit code.
pub async fn run_stdio(gateway: Arc<Gateway>) -> i32 {
    let server = McpServer::new(gateway);
    match server.serve_stdio().await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "MCP stdio server stopped");
            1
        }
    }
}
