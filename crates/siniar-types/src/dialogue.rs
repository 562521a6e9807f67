//! Dialogue turns and the speaker roles they are written for.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One line of dialogue attributed to one speaker role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// Speaker name as written by the model (compared case-insensitively).
    pub speaker: String,
    /// Text to be spoken.
    pub line: String,
}

impl DialogueTurn {
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
        }
    }

    /// Speaker name normalized for comparisons and file names.
    pub fn speaker_key(&self) -> String {
        self.speaker.trim().to_lowercase()
    }
}

/// An ordered sequence of turns. Order is playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dialogue(Vec<DialogueTurn>);

impl Dialogue {
    pub fn new(turns: Vec<DialogueTurn>) -> Self {
        Self(turns)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DialogueTurn> {
        self.0.iter()
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.0
    }

    pub fn into_turns(self) -> Vec<DialogueTurn> {
        self.0
    }
}

impl From<Vec<DialogueTurn>> for Dialogue {
    fn from(turns: Vec<DialogueTurn>) -> Self {
        Self(turns)
    }
}

impl<'a> IntoIterator for &'a Dialogue {
    type Item = &'a DialogueTurn;
    type IntoIter = std::slice::Iter<'a, DialogueTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The two named speaker roles a dialogue is written for.
///
/// Only two roles exist. The first role gets the first voice; anything that
/// is not the first role is treated as the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerRoles {
    pub first: String,
    pub second: String,
}

impl Default for SpeakerRoles {
    fn default() -> Self {
        Self {
            first: "Nadya".to_string(),
            second: "Alif".to_string(),
        }
    }
}

impl SpeakerRoles {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Returns true when `speaker` names the first role, ignoring case and
    /// surrounding whitespace.
    pub fn is_first(&self, speaker: &str) -> bool {
        speaker.trim().to_lowercase() == self.first.trim().to_lowercase()
    }
}

/// Result of rendering one turn to audio.
///
/// Carried from the synthesizer to the assembler so that the assembler, not
/// the synthesizer, decides what a failed turn means for the podcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnAudio {
    /// Position of the turn in the dialogue.
    pub index: usize,
    pub speaker: String,
    /// Path of the written clip, or the reason no clip was written.
    pub outcome: Result<PathBuf, String>,
}

impl TurnAudio {
    pub fn succeeded(index: usize, speaker: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            speaker: speaker.into(),
            outcome: Ok(path.into()),
        }
    }

    pub fn failed(index: usize, speaker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            speaker: speaker.into(),
            outcome: Err(reason.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
