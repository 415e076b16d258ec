//! API schema types for `POST /render/`.

use serde::{Deserialize, Serialize};

/// Default variation seed when the request does not supply one.
fn default_variation() -> String {
    "test".to_string()
}

/// Request body for `POST /render/`.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Domain program text.
    #[serde(default)]
    pub domain: String,

    /// Substance program text.
    #[serde(default)]
    pub substance: String,

    /// Style program text.
    #[serde(default)]
    pub style: String,

    /// Variation seed controlling the renderer's randomized layout choices
    /// (default: "test").
    #[serde(default = "default_variation")]
    pub variation: String,

    /// Client-declared intent that all three programs are being submitted
    /// together. Only selects which validation error message is returned.
    /// Accepts any JSON value; non-boolean values are read for truthiness,
    /// so `"trio": 1` behaves like `"trio": true`.
    #[serde(default, deserialize_with = "truthy")]
    pub trio: bool,
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(fields) => !fields.is_empty(),
    })
}

/// Response body for `POST /render/`.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// Diagram markup, exactly as the renderer wrote it to stdout.
    pub svg: String,
}
