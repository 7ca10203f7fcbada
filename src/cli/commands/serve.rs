//! HTTP API server for integration with other systems.
//!
//! Exposes the same four transcript tools as the MCP server as JSON endpoints.

use crate::cli::Output;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, orchestrator: Orchestrator) -> anyhow::Result<()> {
    let app = router(orchestrator);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tubetext API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Full transcript", "POST /transcript");
    Output::kv("Video information", "POST /info");
    Output::kv("Search", "POST /search");
    Output::kv("Section", "POST /section");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(orchestrator: Orchestrator) -> Router {
    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/transcript", post(transcript))
        .route("/info", post(info))
        .route("/search", post(search))
        .route("/section", post(section))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct VideoRequest {
    /// YouTube URL or video ID
    video_url: String,
}

#[derive(Deserialize)]
struct SearchRequest {
    video_url: String,
    query: String,
    #[serde(default)]
    context_window: Option<u32>,
}

#[derive(Deserialize)]
struct SectionRequest {
    video_url: String,
    start_time: f64,
    #[serde(default)]
    end_time: f64,
}

#[derive(Serialize)]
struct TextResponse {
    text: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// === Handlers ===

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VideoRequest>,
) -> Json<TextResponse> {
    let text = state.orchestrator.get_full_transcript(&req.video_url).await;
    Json(TextResponse { text })
}

async fn info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VideoRequest>,
) -> Json<TextResponse> {
    let text = state.orchestrator.get_video_information(&req.video_url).await;
    Json(TextResponse { text })
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<TextResponse> {
    let text = state
        .orchestrator
        .search_transcript(&req.video_url, &req.query, req.context_window)
        .await;
    Json(TextResponse { text })
}

async fn section(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SectionRequest>,
) -> Json<TextResponse> {
    let text = state
        .orchestrator
        .get_transcript_section(&req.video_url, req.start_time, req.end_time)
        .await;
    Json(TextResponse { text })
}
