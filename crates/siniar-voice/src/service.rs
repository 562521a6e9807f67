use crate::error::VoiceError;
use crate::tts::SpeechSynthesizer;
use crate::voices::VoicePair;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use siniar_types::{retry, Dialogue, DialogueTurn, RetryPolicy, SpeakerRoles, TurnAudio};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Renders every turn of a dialogue to its own audio file.
#[derive(Clone)]
pub struct DialogueSynthesizer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voices: VoicePair,
    roles: SpeakerRoles,
    retry: RetryPolicy,
    concurrency: usize,
}

impl DialogueSynthesizer {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        voices: VoicePair,
        roles: SpeakerRoles,
        retry: RetryPolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            synthesizer,
            voices,
            roles,
            retry,
            concurrency: concurrency.max(1),
        }
    }

    /// Synthesizes all turns into `out_dir`, at most `concurrency` at a time.
    ///
    /// The returned outcomes are in dialogue order regardless of completion
    /// order. Failed turns are reported in their outcome, never as an error.
    pub async fn synthesize_all(&self, dialogue: &Dialogue, out_dir: &Path) -> Vec<TurnAudio> {
        // Boxed so the returned future is `Send` for any borrow lifetime.
        let turns: Vec<BoxFuture<'_, TurnAudio>> = dialogue
            .iter()
            .enumerate()
            .map(|(index, turn)| self.synthesize_turn(index, turn, out_dir).boxed())
            .collect();

        let outcomes: Vec<TurnAudio> = stream::iter(turns)
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        tracing::info!(
            turns = outcomes.len(),
            failed,
            "dialogue synthesis finished"
        );
        outcomes
    }

    async fn synthesize_turn(&self, index: usize, turn: &DialogueTurn, out_dir: &Path) -> TurnAudio {
        let voice_id = self.voices.select(&self.roles, &turn.speaker);
        let dest = clip_path(out_dir, index, turn);

        let result = retry(
            &self.retry,
            "synthesize_turn",
            VoiceError::is_retryable,
            || self.synthesizer.synthesize_to(&turn.line, voice_id, &dest),
        )
        .await;

        match result {
            Ok(bytes) => {
                tracing::debug!(index, voice_id, bytes, path = %dest.display(), "turn synthesized");
                TurnAudio::succeeded(index, &turn.speaker, dest)
            }
            Err(e) => {
                tracing::error!(index, speaker = %turn.speaker, voice_id, error = %e, "failed to synthesize turn");
                TurnAudio::failed(index, &turn.speaker, e.to_string())
            }
        }
    }
}

/// `turn_{index}_{speaker}.mp3`, with the speaker reduced to a safe file-name
/// fragment.
pub fn clip_path(out_dir: &Path, index: usize, turn: &DialogueTurn) -> PathBuf {
    let speaker: String = turn
        .speaker_key()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(32)
        .collect();
    let speaker = if speaker.is_empty() { "unknown".to_string() } else { speaker };
    out_dir.join(format!("turn_{}_{}.mp3", index, speaker))
}
