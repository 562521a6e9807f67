use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    /// One or more turns have no usable audio and the policy forbids gaps.
    #[error("audio missing for turns {turns:?}")]
    Incomplete { turns: Vec<usize> },

    #[error("failed to decode clip for turn {index}: {reason}")]
    Decode { index: usize, reason: String },

    #[error("clip for turn {index} is {found} Hz but the podcast is {expected} Hz")]
    SampleRateMismatch {
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("failed to encode podcast: {0}")]
    Encode(String),

    #[error("audio encoder timed out after {0} seconds")]
    Timeout(u64),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AudioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
