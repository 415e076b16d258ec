//! API schema types for `POST /upload-image/`.

use serde::Serialize;

/// Response body for `POST /upload-image/`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Absolute, externally reachable URL of the stored image.
    pub url: String,
}
