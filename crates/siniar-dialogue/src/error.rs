use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogueError {
    /// A candidate array was found in the reply but could not be parsed.
    #[error("failed to parse dialogue JSON: {0}")]
    Parse(String),

    /// The reply produced no dialogue turns.
    #[error("no dialogue turns were produced")]
    Empty,

    /// The model service answered with a non-success status.
    #[error("model service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The model service could not be reached.
    #[error("model service request failed: {0}")]
    Http(String),

    /// The model service did not answer within the deadline.
    #[error("model service timed out after {0} seconds")]
    Timeout(u64),

    /// The model service answered with a body that is not a generation result.
    #[error("unexpected model response: {0}")]
    InvalidResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
