use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use snippet_exec::{CodeExecutionService, ExecutionRequest, ExecutionResult, ExecutorConfig};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Request bodies above this size are rejected before reaching the handler
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Code and language are required")]
    MissingField,
    #[error("Execution service error: {0}")]
    Service(#[from] snippet_exec::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::MissingField => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Service(_) | ServerError::ServerError(_) => {
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to execute code".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Body of `POST /api/execute`. Fields are optional here so that a missing
/// field gets the same 400 as an empty one.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub code: Option<String>,
    pub language: Option<String>,
    pub input: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    service: CodeExecutionService,
}

pub async fn create_app(config: ExecutorConfig) -> Result<Router, ServerError> {
    let service = CodeExecutionService::new(config).await?;
    let state = AppState { service };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/execute", post(execute))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    Ok(app)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting snippet execution server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "languages": state.service.available_languages(),
    }))
}

async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> Result<Json<ExecutionResult>, ServerError> {
    let (code, language) = match (payload.code, payload.language) {
        (Some(code), Some(language)) if !code.is_empty() && !language.is_empty() => {
            (code, language)
        }
        _ => return Err(ServerError::MissingField),
    };

    let request =
        ExecutionRequest::new(language, code).with_input(payload.input.unwrap_or_default());
    Ok(Json(state.service.execute(request).await))
}
