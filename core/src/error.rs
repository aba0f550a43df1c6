use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Failure body returned to tool callers.
/// `error` is the human/agent-readable message; `code` is stable for matching.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// What went wrong (e.g. "list_id is required")
    pub error: String,
    /// Machine-readable error code (see [`codes`])
    pub code: String,
    /// Which input field caused the error (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Remote context: parsed upstream body, or `{ "raw": text }`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error codes used across the gateway
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const UNKNOWN_TOOL: &str = "unknown_tool";
    pub const MISSING_CREDENTIAL: &str = "missing_credential";
    pub const UNRESOLVED_TEAM: &str = "unresolved_team";
    pub const TEAM_NOT_FOUND: &str = "team_not_found";
    pub const UPSTREAM_ERROR: &str = "upstream_error";
    pub const TRANSPORT_ERROR: &str = "transport_error";
    pub const UPSTREAM_SHAPE: &str = "upstream_shape";
    pub const INVALID_JSON: &str = "invalid_json";
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing CLICKUP_API_TOKEN")]
    MissingCredential,

    #[error("team_id or CLICKUP_TEAM_ID is required")]
    UnresolvedTeam,

    #[error("Team {0} not found for the configured token")]
    TeamNotFound(String),

    #[error("Remote service responded {status}")]
    Upstream { status: u16, details: Value },

    #[error("Failed to reach remote service: {0}")]
    Transport(String),

    #[error("Unexpected {context} payload from remote service: {message}")]
    UnexpectedShape { context: String, message: String },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// `"<field> is required"`, tagged with the field name.
    pub fn required(field: &str) -> Self {
        Self::Validation {
            message: format!("{field} is required"),
            field: Some(field.to_string()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => codes::VALIDATION_FAILED,
            Self::UnknownTool(_) => codes::UNKNOWN_TOOL,
            Self::MissingCredential => codes::MISSING_CREDENTIAL,
            Self::UnresolvedTeam => codes::UNRESOLVED_TEAM,
            Self::TeamNotFound(_) => codes::TEAM_NOT_FOUND,
            Self::Upstream { .. } => codes::UPSTREAM_ERROR,
            Self::Transport(_) => codes::TRANSPORT_ERROR,
            Self::UnexpectedShape { .. } => codes::UPSTREAM_SHAPE,
        }
    }

    /// HTTP status the bindings report for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::UnknownTool(_) | Self::TeamNotFound(_) => 404,
            Self::MissingCredential | Self::UnresolvedTeam => 500,
            Self::Upstream { .. } | Self::Transport(_) | Self::UnexpectedShape { .. } => 502,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let field = match self {
            Self::Validation { field, .. } => field.clone(),
            Self::UnresolvedTeam => Some("team_id".to_string()),
            _ => None,
        };
        let details = match self {
            Self::Upstream { details, .. } => Some(details.clone()),
            Self::TeamNotFound(team_id) => Some(json!({ "team_id": team_id })),
            _ => None,
        };
        ApiError {
            error: self.to_string(),
            code: self.code().to_string(),
            field,
            details,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self.to_api_error())
            .unwrap_or_else(|_| json!({ "error": self.to_string() }))
    }
}
