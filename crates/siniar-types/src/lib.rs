//! Shared types for the siniar podcast pipeline.
//!
//! This crate holds the data that flows between the pipeline crates: the
//! dialogue a language model produces, the two speaker roles it is written
//! for, the pipeline stage markers used in logs and errors, and the retry
//! policy applied to idempotent outbound calls.
//!
//! Nothing here performs I/O apart from the sleep between retries.

pub mod dialogue;
pub mod retry;

pub use dialogue::{Dialogue, DialogueTurn, SpeakerRoles, TurnAudio};
pub use retry::{retry, RetryPolicy};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of a single podcast request.
///
/// A request moves strictly forward through these stages; any stage may
/// end the request early with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Waiting for a document or topic to be resolved.
    AwaitingInput,
    /// Pulling plain text out of an uploaded document.
    Extracting,
    /// Asking the language model for a dialogue.
    Generating,
    /// Rendering each turn to speech.
    Synthesizing,
    /// Concatenating turn audio into the final file.
    Assembling,
    /// The artifact has been written.
    Done,
}

impl PipelineStage {
    /// Returns the log/label form of this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingInput => "awaiting_input",
            Self::Extracting => "extracting",
            Self::Generating => "generating",
            Self::Synthesizing => "synthesizing",
            Self::Assembling => "assembling",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
