//! External renderer invocation.
//!
//! The renderer is an opaque subprocess: it receives a scratch directory
//! containing `domain.dsl`, `substance.dsl`, and `style.dsl` as its final
//! positional argument and the variation seed via the `DIAGRAM_VARIATION`
//! environment variable. On success it writes diagram markup to stdout and
//! exits zero; on failure it writes a JSON diagnostic to stderr and exits
//! non-zero.
//!
//! Each invocation gets a fresh, exclusively owned [`tempfile::TempDir`].
//! The guard is held across the subprocess await, so the directory is
//! removed on every exit path: success, renderer failure, timeout, and
//! client disconnect (dropping the handler future drops the guard and, via
//! `kill_on_drop`, the child process).

use std::borrow::Cow;

use tokio::process::Command;

use crate::config::Config;
use crate::error::ApiError;
use crate::schema::render::RenderRequest;

/// Environment variable carrying the variation seed to the renderer.
const VARIATION_ENV: &str = "DIAGRAM_VARIATION";

/// Upper bound on the diagnostic text logged server-side.
const DIAGNOSTIC_LOG_LIMIT: usize = 5000;

/// Runs the configured renderer over the request's trio programs and returns
/// its stdout as markup.
///
/// No retries under any condition; every failure is surfaced once.
pub async fn render(config: &Config, request: &RenderRequest) -> Result<String, ApiError> {
    let scratch = tempfile::tempdir()?;
    tokio::fs::write(scratch.path().join("domain.dsl"), &request.domain).await?;
    tokio::fs::write(scratch.path().join("substance.dsl"), &request.substance).await?;
    tokio::fs::write(scratch.path().join("style.dsl"), &request.style).await?;

    let (program, args) = config.renderer_command.split_first().ok_or_else(|| {
        ApiError::InternalError("renderer command is not configured".to_string())
    })?;

    let mut command = Command::new(program);
    command
        .args(args)
        .arg(scratch.path())
        .env(VARIATION_ENV, &request.variation)
        .kill_on_drop(true);

    let output = match tokio::time::timeout(config.render_timeout, command.output()).await {
        Err(_) => {
            tracing::warn!(
                timeout_secs = config.render_timeout.as_secs(),
                "renderer timed out"
            );
            return Err(ApiError::RenderTimeout);
        }
        Ok(result) => result.map_err(|err| {
            ApiError::InternalError(format!("failed to spawn renderer: {}", err))
        })?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let info = parse_diagnostic(&stderr);
        tracing::warn!(
            exit_code = ?output.status.code(),
            diagnostic = %truncate_chars(&info.to_string(), DIAGNOSTIC_LOG_LIMIT),
            "renderer failed"
        );
        return Err(ApiError::RenderFailed {
            message: "Diagram render failed".to_string(),
            info,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses the renderer's stderr as a JSON diagnostic, wrapping the raw text
/// as `{"stderr": ...}` if it is not valid JSON.
fn parse_diagnostic(stderr: &str) -> serde_json::Value {
    serde_json::from_str(stderr.trim())
        .unwrap_or_else(|_| serde_json::json!({ "stderr": stderr }))
}

/// Truncates to at most `max` characters, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((index, _)) => Cow::Owned(text[..index].to_string()),
        None => Cow::Borrowed(text),
    }
}
