use serde::{Deserialize, Serialize};

/// Body of `POST /files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesRequest {
    pub remote_file_server_url: String,
    pub lookup_character: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloaded: Option<Vec<String>>,
}
