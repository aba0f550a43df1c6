use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskbridge_core::error::{self, ApiError, GatewayError};

/// Internal error type that converts to structured API responses
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Tool invocation failed; status follows the gateway taxonomy
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Request body is not JSON (400)
    #[error("Invalid JSON body")]
    InvalidJson(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, api_error) = match self {
            AppError::Gateway(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(code = err.code(), error = %err, "tool request failed");
                }
                (status, err.to_api_error())
            }
            AppError::InvalidJson(reason) => {
                tracing::debug!(%reason, "rejecting request body");
                (
                    StatusCode::BAD_REQUEST,
                    ApiError {
                        error: "Invalid JSON body".to_string(),
                        code: error::codes::INVALID_JSON.to_string(),
                        field: None,
                        details: None,
                    },
                )
            }
        };

        (status, Json(api_error)).into_response()
    }
}
