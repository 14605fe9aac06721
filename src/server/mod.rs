//! HTTP surface of the service.
//!
//! - `POST /files` runs the pipeline for one request.
//! - `GET /health` answers `{"status":"ok"}`.
//!
//! Every pipeline error becomes a JSON error response; the server keeps
//! serving other requests.

mod error;
mod handlers;
mod models;

use std::path::PathBuf;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::{fetch_files, health};
pub use models::{ErrorDetail, ErrorResponse, FilesRequest, HealthResponse};

use crate::pipeline::Pipeline;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

/// Builds the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/files", post(fetch_files))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn path_strings(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}
