use std::sync::Arc;
use std::time::Instant;

use serde_json::{Value, json};
use taskbridge_core::config::RemoteConfig;
use taskbridge_core::error::GatewayError;

use crate::client::RemoteClient;
use crate::registry::ToolRegistry;
use crate::tools::ToolSummary;

/// Entry point the transport bindings talk to. Shared read-only across
/// requests.
pub struct Gateway {
    registry: ToolRegistry,
}

impl Gateway {
    pub fn new(config: RemoteConfig) -> Self {
        Self::from_registry(ToolRegistry::new(RemoteClient::new(Arc::new(config))))
    }

    pub fn from_registry(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn tools(&self) -> Vec<ToolSummary> {
        self.registry.list()
    }

    /// `{ "tools": [...] }`
    pub fn list_payload(&self) -> Value {
        json!({ "tools": self.tools() })
    }

    pub async fn invoke(&self, name: &str, input: Option<Value>) -> Result<Value, GatewayError> {
        let started = Instant::now();
        let result = self.registry.invoke(name, input).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(tool = name, elapsed_ms, "tool invocation succeeded"),
            Err(err) => tracing::warn!(
                tool = name,
                elapsed_ms,
                code = err.code(),
                error = %err,
                "tool invocation failed"
            ),
        }
        result
    }
}
