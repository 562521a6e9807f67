//! HTTP handlers.

use crate::error::PodcastError;
use crate::pipeline::PodcastRequest;
use crate::AppState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Form field carrying the document upload.
pub const FILE_FIELD: &str = "file";
/// Form field carrying the topic text.
pub const TOPIC_FIELD: &str = "topic_text";

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handler for `POST /generate-podcast`.
///
/// Accepts a multipart form with an optional `file` and an optional
/// `topic_text`, and answers with the podcast audio as an attachment.
/// A body that is not a multipart form is answered with the JSON error shape
/// like every other failure.
pub async fn generate_podcast_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, PodcastError> {
    let multipart = multipart.map_err(|rejection| {
        PodcastError::InvalidRequest(format!("multipart error: {}", rejection.body_text()))
    })?;
    let request = read_form(multipart).await?;
    let podcast = state.pipeline.run(request).await?;

    let audio = tokio::fs::read(&podcast.path).await.map_err(|e| {
        PodcastError::Internal(format!("failed to read {}: {}", podcast.path.display(), e))
    })?;

    tracing::info!(
        file = %podcast.file_name,
        bytes = audio.len(),
        duration_ms = podcast.duration.as_millis() as u64,
        "podcast served"
    );

    Ok((
        [
            (header::CONTENT_TYPE, podcast.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", podcast.file_name),
            ),
        ],
        audio,
    )
        .into_response())
}

async fn read_form(mut multipart: Multipart) -> Result<PodcastRequest, PodcastError> {
    let mut request = PodcastRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error("multipart error", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| form_error("failed to read file", e))?;
                tracing::debug!(file_name = ?file_name, bytes = data.len(), "document received");
                request.document = Some(data.to_vec());
            }
            TOPIC_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| form_error("failed to read topic", e))?;
                request.topic = Some(text);
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    Ok(request)
}

/// Body-limit overruns surface as multipart read errors; keep them apart
/// from malformed forms.
fn form_error(context: &str, e: MultipartError) -> PodcastError {
    let message = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PodcastError::PayloadTooLarge(message)
    } else {
        PodcastError::InvalidRequest(message)
    }
}
