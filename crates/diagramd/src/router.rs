//! Router assembly for the diagramd HTTP API.
//!
//! [`build_router`] wires the three handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the axum router with all API routes.
///
/// All endpoints are POST-only; other methods get 405 from the router.
/// CORS is permissive (the editor frontend may be served from another
/// origin). TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/render/", post(handlers::render::render_diagram))
        .route("/upload-image/", post(handlers::upload::upload_image))
        .route(
            "/generate-substance/",
            post(handlers::generate::generate_programs),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
