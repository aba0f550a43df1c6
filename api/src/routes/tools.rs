use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use taskbridge_core::error::ApiError;
use taskbridge_mcp_runtime::ToolSummary;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ToolListResponse {
    /// `{ name, description, inputSchema, outputSchema }` per tool
    #[schema(value_type = Vec<Object>)]
    pub tools: Vec<ToolSummary>,
}

/// Either `{ "input": {...} }` or the tool input itself.
#[derive(Serialize, utoipa::ToSchema)]
pub struct InvokeToolRequest {
    #[schema(value_type = Option<Object>)]
    pub input: Option<Value>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct InvokeToolResponse {
    #[schema(value_type = Object)]
    pub result: Value,
}

/// List every tool with its input and output schema
#[utoipa::path(
    get,
    path = "/tools",
    responses(
        (status = 200, description = "Tool catalogue", body = ToolListResponse)
    ),
    tag = "tools"
)]
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.gateway.tools(),
    })
}

/// Invoke a tool by name
#[utoipa::path(
    post,
    path = "/tools/{name}",
    params(("name" = String, Path, description = "Tool name, e.g. create_task")),
    request_body = InvokeToolRequest,
    responses(
        (status = 200, description = "Tool result", body = InvokeToolResponse),
        (status = 400, description = "Invalid input or body", body = ApiError),
        (status = 404, description = "Unknown tool or team", body = ApiError),
        (status = 500, description = "Credential or team not configured", body = ApiError),
        (status = 502, description = "Remote service failure", body = ApiError)
    ),
    tag = "tools"
)]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<InvokeToolResponse>, AppError> {
    let input = tool_input(&body)?;
    let result = state.gateway.invoke(&name, Some(input)).await?;
    Ok(Json(InvokeToolResponse { result }))
}

/// `body.input` when present and non-null, otherwise the whole body.
fn tool_input(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    let parsed: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))?;
    match parsed {
        Value::Object(mut map) => match map.remove("input") {
            Some(input) if !input.is_null() => Ok(input),
            Some(_) | None => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}
