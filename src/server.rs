//! HTTP facade.
//!
//! Exposes the catalog, downloader and search scanner as a small JSON API.
//! Remote and filesystem failures are logged with detail and reported to the
//! caller only as coarse error messages.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/list_pdfs` | Remote catalog (empty array when unavailable) |
//! | `POST` | `/download` | Download one document: `{"file_id": ..., "filename"?: ...}` |
//! | `POST` | `/download_all` | Download every catalog entry |
//! | `POST` | `/search` | Case-insensitive substring search: `{"query": ...}` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": "file_id parameter is required" }
//! ```

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogFetcher;
use crate::config::Config;
use crate::download::Downloader;
use crate::models::{file_id_from_json, CatalogEntry, SearchResult};
use crate::remote;
use crate::search::SearchScanner;

/// Shared state handed to every handler.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: CatalogFetcher,
    downloader: Downloader,
    scanner: Arc<SearchScanner>,
}

/// Builds the router with all routes and layers; used by [`run_server`] and tests.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let client = remote::build_client(&config.remote)?;
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: CatalogFetcher::new(client.clone(), &config.remote),
        downloader: Downloader::new(client, &config.remote, &config.storage),
        scanner: Arc::new(SearchScanner::new(&config.storage, &config.search)?),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/list_pdfs", get(handle_list_pdfs))
        .route("/download", post(handle_download))
        .route("/download_all", post(handle_download_all))
        .route("/search", post(handle_search))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Creates the download directory, binds `[server].bind` and serves until
/// the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let dir = &config.storage.download_dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create download directory: {}", dir.display()))?;

    let app = build_router(config)?;
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        download_dir = %dir.display(),
        "pdf-scout listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Converts into a `{"error": message}` response.
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: &'static str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message,
    }
}

fn internal(message: &'static str) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message,
    }
}

/// Parses a request body as a JSON object; anything else reads as `{}`.
fn json_object(body: &Bytes) -> serde_json::Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============ GET /list_pdfs ============

async fn handle_list_pdfs(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.fetch_or_empty().await)
}

// ============ POST /download ============

#[derive(Serialize)]
struct DownloadResponse {
    message: &'static str,
    filepath: String,
}

async fn handle_download(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DownloadResponse>, ApiError> {
    let params = json_object(&body);
    let file_id = params
        .get("file_id")
        .and_then(file_id_from_json)
        .ok_or_else(|| bad_request("file_id parameter is required"))?;
    let filename = params
        .get("filename")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(state.config.storage.default_filename.as_str());

    match state.downloader.download(&file_id, filename).await {
        Ok(path) => Ok(Json(DownloadResponse {
            message: "File downloaded successfully",
            filepath: path.display().to_string(),
        })),
        Err(e) => {
            tracing::warn!(file_id = %file_id, filename, error = %e, "download failed");
            Err(internal("Failed to download file"))
        }
    }
}

// ============ POST /download_all ============

#[derive(Serialize)]
struct DownloadAllResponse {
    message: &'static str,
    files: Vec<String>,
    skipped: usize,
    failed: usize,
}

async fn handle_download_all(
    State(state): State<AppState>,
) -> Result<Json<DownloadAllResponse>, ApiError> {
    let outcome = match state.downloader.download_all(&state.catalog).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "bulk download aborted, catalog unavailable");
            return Err(internal("Failed to download files"));
        }
    };

    if outcome.catalog_was_empty() {
        return Ok(Json(DownloadAllResponse {
            message: "No files available to download",
            files: Vec::new(),
            skipped: 0,
            failed: 0,
        }));
    }
    if outcome.files.is_empty() {
        return Err(internal("Failed to download files"));
    }

    Ok(Json(DownloadAllResponse {
        message: "Files downloaded successfully",
        files: outcome
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        skipped: outcome.skipped,
        failed: outcome.failed,
    }))
}

// ============ POST /search ============

async fn handle_search(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let params = json_object(&body);
    let query = params
        .get("query")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| bad_request("Query parameter missing"))?
        .to_string();

    let scanner = state.scanner.clone();
    let results = tokio::task::spawn_blocking(move || scanner.scan(&query))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "search task failed");
            internal("Search failed")
        })?;

    Ok(Json(results))
}
