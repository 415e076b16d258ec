//! Server configuration, read once from the environment at startup.
//!
//! Nothing in this crate re-reads the environment or the prompt-guidance file
//! after startup; handlers see an immutable [`Config`] behind the shared
//! application state.

use std::path::PathBuf;
use std::time::Duration;

/// Immutable server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port.
    pub port: u16,
    /// Renderer command line; the scratch directory path is appended as the
    /// final positional argument. First element is the program, rest are args.
    pub renderer_command: Vec<String>,
    /// Wall-clock budget for one renderer invocation.
    pub render_timeout: Duration,
    /// Directory where uploaded images are stored.
    pub media_root: PathBuf,
    /// Public URL path prefix under which `media_root` is served.
    pub media_url: String,
    /// Absolute origin for upload URLs. When unset, the origin is derived
    /// from the request's own `X-Forwarded-Proto` and `Host` headers.
    pub public_url: Option<String>,
    /// Credential for the multimodal model API. Absence is a server
    /// configuration error surfaced at request time, not at startup.
    pub api_key: Option<String>,
    /// OpenAI-compatible API base URL.
    pub api_base_url: String,
    /// Model name for image-to-program requests.
    pub model: String,
    /// Timeout for one remote model call.
    pub model_timeout: Duration,
    /// Extra prompt-guidance text appended to the model instruction.
    /// Loaded once at startup; empty if the file is absent or unreadable.
    pub prompt_guidance: String,
}

impl Config {
    /// Reads configuration from `DIAGRAMD_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let guidance_path =
            env_or("DIAGRAMD_PROMPT_GUIDANCE", "prompt_guidance.txt");

        Config {
            port: env_parsed("DIAGRAMD_PORT", 8000),
            renderer_command: split_command(&env_or(
                "DIAGRAMD_RENDERER_CMD",
                "node render_runner.js",
            )),
            render_timeout: Duration::from_secs(env_parsed(
                "DIAGRAMD_RENDER_TIMEOUT_SECS",
                30,
            )),
            media_root: PathBuf::from(env_or("DIAGRAMD_MEDIA_ROOT", "media/uploads")),
            media_url: env_or("DIAGRAMD_MEDIA_URL", "/media/uploads"),
            public_url: std::env::var("DIAGRAMD_PUBLIC_URL").ok(),
            api_key: std::env::var("DIAGRAMD_API_KEY").ok(),
            api_base_url: env_or("DIAGRAMD_API_BASE_URL", "https://api.openai.com/v1"),
            model: env_or("DIAGRAMD_MODEL", "gpt-4o"),
            model_timeout: Duration::from_secs(env_parsed(
                "DIAGRAMD_MODEL_TIMEOUT_SECS",
                60,
            )),
            prompt_guidance: load_guidance(&guidance_path),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Splits a command line on whitespace. No shell quoting; renderer paths with
/// spaces are not supported.
fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn load_guidance(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
