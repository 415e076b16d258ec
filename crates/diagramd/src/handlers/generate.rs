//! Image-to-programs handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::generate::{GenerateRequest, TrioPrograms};
use crate::state::AppState;
use crate::vision;

/// Turns a previously uploaded sketch image into a full trio-program set via
/// the remote multimodal model.
///
/// `POST /generate-substance/`
pub async fn generate_programs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TrioPrograms>, ApiError> {
    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("invalid JSON body".to_string()))?;
    if request.image_url.trim().is_empty() {
        return Err(ApiError::BadRequest("image_url field required".to_string()));
    }

    // The URL is only trusted as far as its final path segment; anything
    // that could escape the media root is treated as not found. The file
    // existence check happens before any remote call.
    let file_name = media_file_name(&request.image_url)
        .ok_or_else(|| ApiError::BadRequest("image not found".to_string()))?;
    let path = state.config.media_root.join(file_name);
    let exists = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !exists {
        return Err(ApiError::BadRequest("image not found".to_string()));
    }

    let programs = vision::image_to_programs(&state.config, &state.http, &path).await?;
    Ok(Json(programs))
}

/// Extracts the final path segment of an upload URL, rejecting anything that
/// is empty, a dot segment, or contains a path separator.
fn media_file_name(raw_url: &str) -> Option<&str> {
    let path = raw_url
        .split(['?', '#'])
        .next()
        .unwrap_or(raw_url);
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name)
}
