use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use clap::Parser;
use taskbridge_mcp_runtime::{Gateway, RemoteArgs};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod middleware;
mod routes;
mod state;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "taskbridge",
        version = "0.1.0",
        description = "Named tools over the ClickUp API for agents and scripts."
    ),
    paths(
        routes::health::health_check,
        routes::tools::list_tools,
        routes::tools::invoke_tool,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::tools::ToolListResponse,
        routes::tools::InvokeToolRequest,
        routes::tools::InvokeToolResponse,
        taskbridge_core::error::ApiError,
    ))
)]
struct ApiDoc;

#[derive(Parser)]
#[command(
    name = "taskbridge-api",
    version,
    about = "HTTP gateway exposing ClickUp operations as named tools"
)]
struct Cli {
    /// Port to listen on (all interfaces)
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Comma-separated browser origins allowed to call the gateway
    #[arg(long, env = "TASKBRIDGE_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    #[command(flatten)]
    remote: RemoteArgs,
}

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    // Structured JSON logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskbridge_api=debug,taskbridge_mcp_runtime=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cli = Cli::parse();
    let config = cli.remote.into_config();
    if config.token.is_none() {
        tracing::warn!("CLICKUP_API_TOKEN is not set; remote tools will fail until it is");
    }
    if config.default_team_id.is_none() {
        tracing::info!("CLICKUP_TEAM_ID is not set; team-scoped tools need an explicit team_id");
    }

    let app_state = state::AppState {
        gateway: Arc::new(Gateway::new(config)),
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(routes::build_router(app_state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(
                    middleware::request_id::MakeRequestUuidV7,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .option_layer(middleware::cors::build_cors_layer(&cli.cors_origins)),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind listener");
            std::process::exit(1);
        }
    };
    tracing::info!("taskbridge API listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
