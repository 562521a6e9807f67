//! Coercion of a free-text model reply into a [`Dialogue`].
//!
//! Contract:
//! 1. locate the first `[ { ... } ]` substring (greedy, spanning newlines);
//! 2. parse only that substring as an array of `{speaker, line}` objects;
//! 3. drop turns whose line is blank.
//!
//! No candidate array means an empty dialogue, not an error. A candidate that
//! fails to parse is a [`DialogueError::Parse`].

use crate::error::DialogueError;
use regex::Regex;
use serde::Deserialize;
use siniar_types::{Dialogue, DialogueTurn};
use std::sync::LazyLock;

static DIALOGUE_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").unwrap());

#[derive(Debug, Deserialize)]
struct RawTurn {
    speaker: String,
    line: String,
}

/// Returns the candidate array literal inside `reply`, if any.
pub fn locate_array(reply: &str) -> Option<&str> {
    DIALOGUE_ARRAY.find(reply).map(|m| m.as_str())
}

/// Extracts a dialogue from a model reply.
pub fn coerce_dialogue(reply: &str) -> Result<Dialogue, DialogueError> {
    let Some(candidate) = locate_array(reply) else {
        tracing::debug!(reply_len = reply.len(), "no dialogue array found in model reply");
        return Ok(Dialogue::empty());
    };

    let raw: Vec<RawTurn> =
        serde_json::from_str(candidate).map_err(|e| DialogueError::Parse(e.to_string()))?;

    let total = raw.len();
    let turns: Vec<DialogueTurn> = raw
        .into_iter()
        .filter(|turn| !turn.line.trim().is_empty())
        .map(|turn| DialogueTurn::new(turn.speaker, turn.line))
        .collect();

    if turns.len() < total {
        tracing::warn!(
            dropped = total - turns.len(),
            "dropped dialogue turns with blank lines"
        );
    }

    Ok(Dialogue::new(turns))
}
