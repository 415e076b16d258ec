//! Diagram render handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::renderer;
use crate::schema::render::{RenderRequest, RenderResponse};
use crate::state::AppState;

/// Renders trio programs to diagram markup via the external renderer.
///
/// `POST /render/`
///
/// The body is parsed by hand so that any malformed JSON is a 400 with the
/// same error shape as every other failure.
pub async fn render_diagram(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RenderResponse>, ApiError> {
    let request: RenderRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("invalid JSON body".to_string()))?;

    // The trio branch can only fire when the generic check below would also
    // fire; both messages are kept because clients match on them.
    if request.trio
        && request.domain.is_empty()
        && request.substance.is_empty()
        && request.style.is_empty()
    {
        return Err(ApiError::BadRequest(
            "Please send domain, substance, and style fields (strings)".to_string(),
        ));
    }

    if request.domain.is_empty() || request.substance.is_empty() || request.style.is_empty() {
        return Err(ApiError::BadRequest(
            "domain, substance, and style fields required".to_string(),
        ));
    }

    let svg = renderer::render(&state.config, &request).await?;
    Ok(Json(RenderResponse { svg }))
}
