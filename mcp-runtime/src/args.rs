use clap::Args;
use taskbridge_core::config::{API_BASE_ENV, API_TOKEN_ENV, DEFAULT_API_BASE, RemoteConfig, TEAM_ID_ENV};

/// Remote service settings shared by the HTTP and stdio binaries.
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Personal API token sent verbatim in the Authorization header
    #[arg(long, env = API_TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Workspace (team) id used when a tool input omits team_id
    #[arg(long, env = TEAM_ID_ENV)]
    pub team_id: Option<String>,

    /// Base URL of the remote API
    #[arg(long, env = API_BASE_ENV, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl RemoteArgs {
    pub fn into_config(self) -> RemoteConfig {
        RemoteConfig::new(self.api_base, self.token, self.team_id)
    }
}
