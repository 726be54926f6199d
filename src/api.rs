// 🌐 REST API - chat endpoint over axum
// Every /chat request gets a 200 with a {"response": ...} body

use crate::resolver::{QueryResolver, DEFAULT_COMPANY};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const ERROR_RESPONSE: &str = "An error occurred, please try again.";

/// Shared application state. The resolver holds the table behind an Arc.
#[derive(Clone)]
pub struct AppState {
    resolver: QueryResolver,
}

impl AppState {
    pub fn new(resolver: QueryResolver) -> Self {
        AppState { resolver }
    }
}

/// POST /chat body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    companies: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET / - Serve the chat page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let table = state.resolver.table();
    Json(HealthResponse {
        status: "ok",
        records: table.len(),
        companies: table.companies().len(),
    })
}

/// POST /chat - Answer one question
async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let response = match answer(&state.resolver, &body) {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Chat request failed");
            ERROR_RESPONSE.to_string()
        }
    };

    Json(ChatResponse { response })
}

/// Body is parsed here rather than by the Json extractor so that
/// malformed input still produces a 200 with the generic message.
fn answer(resolver: &QueryResolver, body: &[u8]) -> Result<String> {
    let request: ChatRequest =
        serde_json::from_slice(body).context("Failed to parse chat request body")?;

    let message = request
        .message
        .ok_or_else(|| anyhow!("Chat request has no message"))?;
    let company = request
        .company_name
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

    Ok(resolver.resolve(&message, &company)?)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
