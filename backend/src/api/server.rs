//! HTTP server for the candidate intake API.
//!
//! # API Endpoints
//!
//! | Method | Path                   | Description                               |
//! |--------|------------------------|-------------------------------------------|
//! | GET    | `/health`              | Health check                              |
//! | GET    | `/api/candidates`      | List candidates, newest first             |
//! | POST   | `/api/candidates`      | Upload `name`, `surname` and a spreadsheet |
//! | DELETE | `/api/candidates/{id}` | Delete one candidate                      |
//! | DELETE | `/api/candidates`      | Delete every candidate                    |
//! | GET    | `/api/logs`            | SSE stream for real-time pipeline logs    |

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{delete, get},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use super::logs::{log_error, log_info, log_warning, LOG_BROADCASTER};
use super::types::{CandidateUpload, DeleteAllResponse};
use crate::error::{ServerError, ServerResult};
use crate::models::CandidateRecord;
use crate::store::{CandidateStore, MemoryStore, SqliteStore};
use crate::transform::pipeline::process_candidate;
use crate::validation::validate_identity;

/// Default request body limit for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server settings, filled from CLI flags / environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite URL; `None` keeps candidates in memory
    pub database_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Start the HTTP server with the store selected by `config`.
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(url) => {
            let store = SqliteStore::connect(url).await?;
            serve(Arc::new(store), &config).await
        }
        None => {
            log_warning("No database configured, candidates are kept in memory");
            serve(Arc::new(MemoryStore::new()), &config).await
        }
    }
}

async fn serve<S: CandidateStore>(
    store: Arc<S>,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(store, config.max_upload_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🚀 Candidate intake server running on http://localhost:{}", config.port);
    info!("   GET    /api/candidates      - List candidates");
    info!("   POST   /api/candidates      - Upload candidate spreadsheet");
    info!("   DELETE /api/candidates/{{id}} - Delete one candidate");
    info!("   DELETE /api/candidates      - Delete all candidates");
    info!("   GET    /api/logs            - SSE log stream");
    info!("   GET    /health              - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router over any candidate store.
pub fn build_router<S: CandidateStore>(store: Arc<S>, max_upload_bytes: usize) -> Router {
    // permissive CORS so a separately served browser form can call us
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route(
            "/api/candidates",
            get(list_candidates::<S>)
                .post(upload_candidate::<S>)
                .delete(remove_all_candidates::<S>),
        )
        .route("/api/candidates/{id}", delete(remove_candidate::<S>))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(store)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "candidate-intake",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "list": "GET /api/candidates",
            "upload": "POST /api/candidates",
            "remove": "DELETE /api/candidates/{id}",
            "removeAll": "DELETE /api/candidates",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // lagged receivers just skip the entries they missed
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn list_candidates<S: CandidateStore>(
    State(store): State<Arc<S>>,
) -> ServerResult<Json<Vec<CandidateRecord>>> {
    Ok(Json(store.find_all().await?))
}

/// Upload endpoint: identity fields + spreadsheet -> saved candidate
async fn upload_candidate<S: CandidateStore>(
    State(store): State<Arc<S>>,
    multipart: Multipart,
) -> ServerResult<(StatusCode, Json<CandidateRecord>)> {
    let upload = CandidateUpload::from_multipart(multipart).await?;
    let upload_id = Uuid::new_v4();

    log_info(format!(
        "📄 Upload {}: {} {} - {} ({} bytes)",
        upload_id,
        upload.identity.name,
        upload.identity.surname,
        upload.file_name.as_deref().unwrap_or("no file"),
        upload.file.as_ref().map_or(0, Vec::len)
    ));

    if let Err(errors) = validate_identity(&upload.identity) {
        log_error(format!("Upload {} rejected: {}", upload_id, errors.join("; ")));
        return Err(ServerError::BadRequest(errors));
    }

    match process_candidate(store.as_ref(), upload.identity, upload.file).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record))),
        Err(e) => {
            log_error(format!("Upload {} rejected: {}", upload_id, e));
            Err(e.into())
        }
    }
}

async fn remove_candidate<S: CandidateStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    store.remove(id).await?;
    log_info(format!("🗑️  Candidate {} deleted", id));
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_all_candidates<S: CandidateStore>(
    State(store): State<Arc<S>>,
) -> ServerResult<Json<DeleteAllResponse>> {
    let deleted = store.remove_all().await?;
    log_info(format!("🗑️  {} candidates deleted", deleted));
    Ok(Json(DeleteAllResponse { deleted }))
}
