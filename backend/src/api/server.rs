//! HTTP Server for the player-statistics API.
//!
//! Every request runs the synchronous core on the cached table. Loading
//! the table reads and hashes the file, so it runs on the blocking pool.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | GET    | `/api/players`    | Cleaned rows and cell errors         |
//! | GET    | `/api/filters`    | Filter widget domains                |
//! | POST   | `/api/dashboard`  | Full dashboard for a filter set      |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, DashboardResponse, FiltersResponse, PlayersResponse};
use crate::cache::load_cached;
use crate::config::AppConfig;
use crate::dashboard::build_dashboard;
use crate::error::{ServerError, ServerResult};
use crate::filter::{FilterOptions, FilterSet};
use crate::models::PlayerTable;
use crate::transform::CleaningPlan;

/// Shared handler state
pub struct AppState {
    pub config: AppConfig,
    pub plan: CleaningPlan,
}

/// Load the cleaned table off the async workers.
async fn load_table(state: &Arc<AppState>) -> ServerResult<Arc<PlayerTable>> {
    let state = Arc::clone(state);
    let table = tokio::task::spawn_blocking(move || load_cached(&state.config.data_path, &state.plan)).await??;
    Ok(table)
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn reject(err: ServerError) -> (StatusCode, Json<Value>) {
    log_error(err.to_string());
    (err.status_code(), Json(error_response(&err.to_string())))
}

/// Build the router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/players", get(players))
        .route("/api/filters", get(filters))
        .route("/api/dashboard", post(dashboard))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig, plan: CleaningPlan) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let data_path = config.data_path.display().to_string();
    let app = router(AppState { config, plan });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 PL analyzer server running on http://localhost:{}", port);
    println!("   Data file: {}", data_path);
    println!("   GET  /api/players   - Cleaned player rows");
    println!("   GET  /api/filters   - Filter options");
    println!("   POST /api/dashboard - Dashboard for a filter set");
    println!("   GET  /api/logs      - SSE log stream");
    println!("   GET  /health        - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pl-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "players": "GET /api/players",
            "filters": "GET /api/filters",
            "dashboard": "POST /api/dashboard",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn players(State(state): State<Arc<AppState>>) -> ApiResult<PlayersResponse> {
    let table = load_table(&state).await.map_err(reject)?;
    Ok(Json(PlayersResponse::from(table.as_ref())))
}

async fn filters(State(state): State<Arc<AppState>>) -> ApiResult<FiltersResponse> {
    let table = load_table(&state).await.map_err(reject)?;
    Ok(Json(FiltersResponse {
        options: FilterOptions::from_table(&table),
    }))
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilterSet>, JsonRejection>,
) -> ApiResult<DashboardResponse> {
    let Json(filters) = payload.map_err(|e| reject(ServerError::BadRequest(e.body_text())))?;
    let table = load_table(&state).await.map_err(reject)?;

    log_info(format!("Building dashboard over {} rows", table.len()));
    Ok(Json(DashboardResponse::from(build_dashboard(&table, &filters))))
}
