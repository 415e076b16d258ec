//! Image-to-program pipeline against the remote multimodal model.
//!
//! The pipeline is: read the stored image, downscale and re-encode it as a
//! JPEG data URL ([`encode`]), build the instruction text ([`prompt`]), POST
//! it to an OpenAI-compatible chat endpoint, then recover trio programs from
//! whatever the model answered ([`extract`]). The remote response shape is
//! not contractually guaranteed, so extraction is deliberately tolerant.

pub mod encode;
pub mod extract;
pub mod prompt;

use std::path::Path;

use serde_json::json;

use crate::config::Config;
use crate::error::ApiError;
use crate::schema::generate::TrioPrograms;

/// Runs the full pipeline for one stored image.
///
/// A missing API credential is a server-configuration error (500). Transport
/// failures and unusable model output are upstream errors (502), except a
/// request timeout which is reported as 504. Nothing here retries.
pub async fn image_to_programs(
    config: &Config,
    http: &reqwest::Client,
    image_path: &Path,
) -> Result<TrioPrograms, ApiError> {
    let bytes = tokio::fs::read(image_path).await?;
    let data_url = encode::to_data_url(&bytes)?;
    let instruction = prompt::build_instruction(&config.prompt_guidance);

    let api_key = config.api_key.as_deref().ok_or_else(|| {
        ApiError::InternalError("server is missing model API credential".to_string())
    })?;

    let endpoint = format!(
        "{}/chat/completions",
        config.api_base_url.trim_end_matches('/')
    );
    let body = json!({
        "model": config.model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": instruction },
                { "type": "image_url", "image_url": { "url": data_url } }
            ]
        }],
        "response_format": { "type": "json_object" }
    });

    let response = http
        .post(&endpoint)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            if err.is_timeout() {
                ApiError::UpstreamTimeout
            } else {
                ApiError::Upstream(format!("model request failed: {}", err))
            }
        })?;

    let status = response.status();
    let body_text = response.text().await.map_err(|err| {
        if err.is_timeout() {
            ApiError::UpstreamTimeout
        } else {
            ApiError::Upstream(format!("model response read failed: {}", err))
        }
    })?;

    if !status.is_success() {
        return Err(ApiError::Upstream(format!(
            "model request failed ({}): {}",
            status, body_text
        )));
    }

    // A non-JSON body still goes through the extraction chain as a raw
    // string rather than failing outright.
    let value: serde_json::Value =
        serde_json::from_str(&body_text).unwrap_or(serde_json::Value::String(body_text));
    let answer = extract::response_text(&value);

    extract::programs_from_text(&answer)
        .ok_or_else(|| ApiError::Upstream("model did not return valid output".to_string()))
}
