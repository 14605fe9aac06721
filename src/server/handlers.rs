use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use tracing::info;

use super::error::ApiError;
use super::models::{FilesRequest, HealthResponse};
use super::{AppState, path_strings};
use crate::pipeline::RequestContext;

/// `POST /files`: downloads the files where the lookup character appears
/// earliest and returns their local paths in lexicographic order.
pub async fn fetch_files(
    State(state): State<AppState>,
    payload: Result<Json<FilesRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Json(request) = payload?;
    info!(
        remote_file_server_url = %request.remote_file_server_url,
        lookup_character = %request.lookup_character,
        "files request received"
    );

    let context = RequestContext::new(&request.remote_file_server_url, &request.lookup_character)?;
    let output = state.pipeline.run(context).await?;

    Ok(Json(path_strings(&output.downloaded)))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
