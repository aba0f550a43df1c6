pub mod health;
pub mod tools;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// All application routes with state applied. Documentation and tower layers
/// are added by `main`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tools::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
