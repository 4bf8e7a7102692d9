mod results;
mod upload;


use std::{path::Path, path::PathBuf, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use fincheck_analyzer::GeminiClient;
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::{request_id, request_span, REQUEST_ID_HEADER};

/// Dependencies shared by every handler, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub analyzer: GeminiClient,
    pub upload_dir: Arc<PathBuf>,
}

/// HTTP-level settings that shape the router rather than the handlers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

pub(super) fn map_db_error(error: &fincheck_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::internal(format!("database query failed: {error}"))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

/// Static frontend assets; any path without a matching file gets `index.html`
/// so client-side routes resolve.
fn spa_service(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")))
}

pub fn build_app(state: AppState, settings: &HttpSettings) -> Router {
    Router::new()
        .route(
            "/upload",
            post(upload::upload_document)
                .layer(DefaultBodyLimit::max(settings.max_upload_bytes)),
        )
        .route("/results", get(results::list_results))
        .route("/health", get(health))
        .fallback_service(spa_service(&settings.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match fincheck_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
