use crate::config::{AssemblyConfig, MissingClipPolicy, OutputFormat};
use crate::decode::decode_clip;
use crate::encode::{AudioEncoder, Mp3Encoder, WavEncoder};
use crate::error::AudioError;
use crate::pcm::{concat_with_gaps, PcmClip};
use siniar_types::TurnAudio;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The finished podcast file.
#[derive(Debug, Clone, PartialEq)]
pub struct Podcast {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: &'static str,
    pub duration: Duration,
}

/// Concatenates per-turn clips into one podcast file.
#[derive(Clone)]
pub struct PodcastAssembler {
    output_dir: PathBuf,
    gap: Duration,
    policy: MissingClipPolicy,
    fallback_sample_rate: u32,
    encoder: Arc<dyn AudioEncoder>,
}

impl PodcastAssembler {
    pub fn new(output_dir: impl AsRef<Path>, config: &AssemblyConfig) -> Self {
        let encoder: Arc<dyn AudioEncoder> = match config.output_format {
            OutputFormat::Mp3 => Arc::new(Mp3Encoder::from_config(config)),
            OutputFormat::Wav => Arc::new(WavEncoder),
        };
        Self::with_encoder(output_dir, config, encoder)
    }

    pub fn with_encoder(
        output_dir: impl AsRef<Path>,
        config: &AssemblyConfig,
        encoder: Arc<dyn AudioEncoder>,
    ) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            gap: Duration::from_millis(config.gap_ms),
            policy: config.missing_clip_policy,
            fallback_sample_rate: config.fallback_sample_rate,
            encoder,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Assembles the clips of `turns` in the order given.
    #[tracing::instrument(skip_all, fields(turns = turns.len(), policy = ?self.policy))]
    pub async fn assemble(&self, turns: &[TurnAudio]) -> Result<Podcast, AudioError> {
        let clips = self.load_clips(turns).await?;

        let sample_rate = clips
            .iter()
            .flatten()
            .map(|(_, clip)| clip.sample_rate)
            .next()
            .unwrap_or(self.fallback_sample_rate);

        if let Some((index, clip)) = clips
            .iter()
            .flatten()
            .find(|(_, clip)| clip.sample_rate != sample_rate)
        {
            return Err(AudioError::SampleRateMismatch {
                index: *index,
                expected: sample_rate,
                found: clip.sample_rate,
            });
        }

        let empty = PcmClip::new(sample_rate, Vec::new());
        let merged = concat_with_gaps(
            clips
                .iter()
                .map(|slot| slot.as_ref().map(|(_, clip)| clip).unwrap_or(&empty)),
            sample_rate,
            self.gap,
        );

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AudioError::io(&self.output_dir, e))?;

        let file_name = format!(
            "podcast_final_{}.{}",
            Uuid::new_v4().simple(),
            self.encoder.extension()
        );
        let path = self.output_dir.join(&file_name);
        self.encoder.encode(&merged, &path).await?;

        let duration = merged.duration();
        tracing::info!(
            path = %path.display(),
            duration_ms = duration.as_millis() as u64,
            "podcast assembled"
        );

        Ok(Podcast {
            path,
            file_name,
            content_type: self.encoder.content_type(),
            duration,
        })
    }

    /// Reads and decodes every clip. A `None` slot is a turn replaced by a
    /// zero-length clip under [`MissingClipPolicy::Silence`].
    async fn load_clips(&self, turns: &[TurnAudio]) -> Result<Vec<Option<(usize, PcmClip)>>, AudioError> {
        let mut missing = Vec::new();
        let mut slots = Vec::with_capacity(turns.len());

        for turn in turns {
            let data = match &turn.outcome {
                Ok(path) => match tokio::fs::read(path).await {
                    Ok(data) if !data.is_empty() => Some(data),
                    Ok(_) => {
                        tracing::warn!(index = turn.index, path = %path.display(), "clip file is empty");
                        None
                    }
                    Err(e) => {
                        tracing::warn!(index = turn.index, path = %path.display(), error = %e, "clip file unreadable");
                        None
                    }
                },
                Err(reason) => {
                    tracing::warn!(index = turn.index, %reason, "turn has no clip");
                    None
                }
            };

            let Some(data) = data else {
                missing.push(turn.index);
                slots.push(None);
                continue;
            };

            let index = turn.index;
            let decoded = tokio::task::spawn_blocking(move || decode_clip(&data))
                .await
                .map_err(|e| AudioError::Decode {
                    index,
                    reason: format!("decoder task failed: {}", e),
                })?;

            match decoded {
                Ok(clip) => slots.push(Some((index, clip))),
                Err(reason) if self.policy == MissingClipPolicy::Silence => {
                    tracing::warn!(index, %reason, "undecodable clip replaced with silence");
                    slots.push(None);
                }
                Err(reason) => return Err(AudioError::Decode { index, reason }),
            }
        }

        if !missing.is_empty() && self.policy == MissingClipPolicy::Fail {
            return Err(AudioError::Incomplete { turns: missing });
        }

        Ok(slots)
    }
}
