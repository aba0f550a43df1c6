/// Base URL of the ClickUp v2 REST API.
pub const DEFAULT_API_BASE: &str = "https://api.clickup.com/api/v2";

pub const API_TOKEN_ENV: &str = "CLICKUP_API_TOKEN";
pub const TEAM_ID_ENV: &str = "CLICKUP_TEAM_ID";
pub const API_BASE_ENV: &str = "CLICKUP_API_BASE";

/// Remote-service settings, resolved once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub default_team_id: Option<String>,
}

impl RemoteConfig {
    /// Blank values count as unset so that `CLICKUP_TEAM_ID=` in a `.env`
    /// behaves like an absent variable.
    pub fn new(
        api_base: impl Into<String>,
        token: Option<String>,
        default_team_id: Option<String>,
    ) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: non_blank(token),
            default_team_id: non_blank(default_team_id),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None, None)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
