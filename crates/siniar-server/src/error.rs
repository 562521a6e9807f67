//! Request-level errors and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use siniar_audio::AudioError;
use siniar_dialogue::DialogueError;
use siniar_document::ExtractError;
use siniar_types::PipelineStage;
use thiserror::Error;

/// Everything a podcast request can fail with.
///
/// External-service failures (`Upstream`, `UpstreamTimeout`, `Synthesis`)
/// are kept apart from failures of the server's own logic (`Internal`).
#[derive(Error, Debug)]
pub enum PodcastError {
    /// Neither a document nor a topic was supplied.
    #[error("Kirimkan file PDF atau masukkan teks topik")]
    MissingInput,

    /// The request body could not be read as a form.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The body exceeded the configured upload limit.
    #[error("upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("failed to extract document text: {0}")]
    Extraction(String),

    /// A candidate array was located in the model reply but did not parse.
    #[error("Parsing JSON gagal: {0}")]
    DialogueParse(String),

    #[error("Tidak ada dialog yang dihasilkan")]
    EmptyDialogue,

    /// No turn could be synthesized.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("audio missing for turns {turns:?}")]
    IncompleteAudio { turns: Vec<usize> },

    #[error("upstream service timed out while {stage}")]
    UpstreamTimeout { stage: PipelineStage },

    #[error("upstream service failed: {0}")]
    Upstream(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl PodcastError {
    /// Stable machine-readable name, sent as `kind` in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::InvalidRequest(_) => "invalid_request",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Extraction(_) => "extraction",
            Self::DialogueParse(_) => "dialogue_parse",
            Self::EmptyDialogue => "empty_dialogue",
            Self::Synthesis(_) => "synthesis",
            Self::IncompleteAudio { .. } => "incomplete_audio",
            Self::UpstreamTimeout { .. } => "upstream_timeout",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Extraction(_) | Self::EmptyDialogue => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DialogueParse(_)
            | Self::Synthesis(_)
            | Self::IncompleteAudio { .. }
            | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PodcastError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "podcast request failed");
        } else {
            tracing::info!(kind = self.kind(), error = %self, "podcast request rejected");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

impl From<DialogueError> for PodcastError {
    fn from(e: DialogueError) -> Self {
        match e {
            DialogueError::Parse(reason) => Self::DialogueParse(reason),
            DialogueError::Empty => Self::EmptyDialogue,
            DialogueError::Timeout(_) => Self::UpstreamTimeout {
                stage: PipelineStage::Generating,
            },
            DialogueError::Upstream { .. }
            | DialogueError::Http(_)
            | DialogueError::InvalidResponse(_) => Self::Upstream(e.to_string()),
            DialogueError::Config(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<ExtractError> for PodcastError {
    fn from(e: ExtractError) -> Self {
        Self::Extraction(e.to_string())
    }
}

impl From<AudioError> for PodcastError {
    fn from(e: AudioError) -> Self {
        match e {
            AudioError::Incomplete { turns } => Self::IncompleteAudio { turns },
            other => Self::Internal(other.to_string()),
        }
    }
}
