//! Binary entrypoint for the diagramd HTTP server.
//!
//! All configuration comes from environment variables read once at startup;
//! see [`config::Config::from_env`] for the full list. The most important:
//! - `DIAGRAMD_PORT`: listen port (default: "8000")
//! - `DIAGRAMD_RENDERER_CMD`: renderer command line
//! - `DIAGRAMD_MEDIA_ROOT`: upload storage directory
//! - `DIAGRAMD_API_KEY`: credential for the multimodal model API

use diagramd::config::Config;
use diagramd::router::build_router;
use diagramd::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let port = config.port;

    let state = AppState::new(config)
        .expect("Failed to initialize application state");

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("diagramd server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
