//! Image upload handler.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::schema::upload::UploadResponse;
use crate::state::AppState;

/// Accepted upload extensions, matched case-insensitively.
const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Stores an uploaded image under the media root and returns its public URL.
///
/// `POST /upload-image/`
///
/// The extension allow-list alone would trust whatever name the client sent,
/// so the bytes are also sniffed: the content must identify as PNG, JPEG, or
/// WebP before anything is written.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut image: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("invalid multipart body: {}", err)))?
    {
        if field.name() == Some("image") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::BadRequest(format!("failed to read upload: {}", err)))?;
            image = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) =
        image.ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;

    let ext = extension_of(&file_name)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| ApiError::BadRequest("unsupported file type".to_string()))?;
    if !content_is_image(&bytes) {
        return Err(ApiError::BadRequest("unsupported file type".to_string()));
    }

    tokio::fs::create_dir_all(&state.config.media_root).await?;
    let stored_name = format!("upload_{}.{}", Uuid::new_v4().simple(), ext);
    tokio::fs::write(state.config.media_root.join(&stored_name), &bytes).await?;

    let url = public_url(&state.config, &headers, &stored_name);
    Ok(Json(UploadResponse { url }))
}

/// Lowercased extension of an uploaded filename, if it has one.
fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn content_is_image(bytes: &[u8]) -> bool {
    matches!(
        image::guess_format(bytes),
        Ok(image::ImageFormat::Png | image::ImageFormat::Jpeg | image::ImageFormat::WebP)
    )
}

/// Absolute URL for a stored upload: configured origin if set, otherwise the
/// request's own forwarded scheme and Host header.
fn public_url(config: &Config, headers: &HeaderMap, stored_name: &str) -> String {
    let origin = match &config.public_url {
        Some(origin) => origin.trim_end_matches('/').to_string(),
        None => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("http");
            let host = headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("localhost");
            format!("{}://{}", scheme, host)
        }
    };

    format!(
        "{}/{}/{}",
        origin,
        config.media_url.trim_matches('/'),
        stored_name
    )
}
