use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("TTS service returned {status}: {body}")]
    Synthesis { status: u16, body: String },

    #[error("TTS request failed: {0}")]
    Http(String),

    #[error("TTS request timed out after {0} seconds")]
    Timeout(u64),

    #[error("text is empty after cleaning")]
    EmptyText,

    #[error("TTS error: {0}")]
    Tts(String),

    #[error("failed to write audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VoiceError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Http(_) => true,
            Self::Synthesis { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
