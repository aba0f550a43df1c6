use std::sync::Arc;

use taskbridge_mcp_runtime::Gateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}
