//! API schema types for `POST /generate-substance/`.

use serde::{Deserialize, Serialize};

/// Request body for `POST /generate-substance/`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// URL previously returned by `/upload-image/`. Only its final path
    /// segment is used; it must name a file under the media root.
    #[serde(default)]
    pub image_url: String,
}

/// A complete set of trio programs, produced by the model and accepted
/// unchanged by `/render/` request validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrioPrograms {
    /// Domain program text.
    pub domain: String,
    /// Substance program text.
    pub substance: String,
    /// Style program text.
    pub style: String,
}
