//! Siniar server library logic.
//!
//! Turns an uploaded document or a topic into a two-speaker podcast:
//! extract text, ask a language model for a dialogue, synthesize each turn,
//! and join the clips into one audio file.

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod resolver;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use pipeline::PodcastPipeline;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::PodcastError;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The podcast pipeline.
    pub pipeline: Arc<PodcastPipeline>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(api::health))
        .route("/generate-podcast", post(api::generate_podcast_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
