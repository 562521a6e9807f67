//! The podcast request state machine.
//!
//! A request runs strictly forward through
//! `AwaitingInput → Extracting → Generating → Synthesizing → Assembling → Done`.
//! Extraction is skipped for topic requests. Every transition is logged with
//! a `stage` field inside a span carrying the request id.

use crate::config::Config;
use crate::error::PodcastError;
use crate::resolver::{TextSource, TextSourceResolver};
use siniar_audio::{Podcast, PodcastAssembler};
use siniar_dialogue::{DialogueGenerator, PromptTemplate, TextGenerator};
use siniar_document::DocumentExtractor;
use siniar_types::PipelineStage;
use siniar_voice::{DialogueSynthesizer, SpeechSynthesizer, VoicePair};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

/// Input of one request. At least one of the two must be usable.
#[derive(Debug, Clone, Default)]
pub struct PodcastRequest {
    pub document: Option<Vec<u8>>,
    pub topic: Option<String>,
}

/// The composed pipeline. One instance serves all requests.
pub struct PodcastPipeline {
    resolver: TextSourceResolver,
    generator: DialogueGenerator,
    synthesizer: DialogueSynthesizer,
    assembler: PodcastAssembler,
    audio_dir: PathBuf,
}

impl PodcastPipeline {
    pub fn new(
        resolver: TextSourceResolver,
        generator: DialogueGenerator,
        synthesizer: DialogueSynthesizer,
        assembler: PodcastAssembler,
        audio_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            generator,
            synthesizer,
            assembler,
            audio_dir: audio_dir.into(),
        }
    }

    /// Wires the stages from configuration around the given backends.
    pub fn from_config(
        config: &Config,
        extractor: Arc<dyn DocumentExtractor>,
        model: Arc<dyn TextGenerator>,
        tts: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let roles = config.dialogue.speakers.clone();

        let resolver = TextSourceResolver::new(
            extractor,
            &config.storage.temp_dir,
            Duration::from_secs(config.extraction.timeout_secs),
            config.retry.clone(),
        );
        let generator = DialogueGenerator::new(
            model,
            PromptTemplate::new(&config.dialogue.language, roles.clone()),
            config.gemini.sampling.clone(),
        );
        let synthesizer = DialogueSynthesizer::new(
            tts,
            VoicePair::new(
                &config.elevenlabs.voice_one_id,
                &config.elevenlabs.voice_two_id,
            ),
            roles,
            config.retry.clone(),
            config.elevenlabs.concurrency,
        );
        let assembler = PodcastAssembler::new(&config.storage.output_dir, &config.assembly);

        Self::new(
            resolver,
            generator,
            synthesizer,
            assembler,
            &config.storage.audio_dir,
        )
    }

    /// Runs one request to completion.
    pub async fn run(&self, request: PodcastRequest) -> Result<Podcast, PodcastError> {
        let request_id = Uuid::new_v4().simple().to_string();
        let span = tracing::info_span!("podcast", %request_id);
        self.run_stages(&request_id, request).instrument(span).await
    }

    async fn run_stages(&self, request_id: &str, request: PodcastRequest) -> Result<Podcast, PodcastError> {
        enter(PipelineStage::AwaitingInput);
        if request.document.as_deref().is_some_and(|d| !d.is_empty()) {
            enter(PipelineStage::Extracting);
        }
        let resolved = self
            .resolver
            .resolve(request.document.as_deref(), request.topic.as_deref())
            .await?;
        tracing::info!(
            source = resolved.source.as_str(),
            chars = resolved.text.chars().count(),
            "source text resolved"
        );
        if resolved.source == TextSource::Document && resolved.text.is_empty() {
            tracing::warn!("document has no extractable text");
        }

        enter(PipelineStage::Generating);
        let dialogue = self.generator.generate(&resolved.text).await?;

        enter(PipelineStage::Synthesizing);
        let clip_dir = self.audio_dir.join(request_id);
        tokio::fs::create_dir_all(&clip_dir)
            .await
            .map_err(|e| PodcastError::Internal(format!("failed to create audio dir: {}", e)))?;
        let clips = self.synthesizer.synthesize_all(&dialogue, &clip_dir).await;

        if !clips.is_empty() && clips.iter().all(|c| !c.is_ok()) {
            let reason = clips
                .iter()
                .find_map(|c| c.outcome.as_ref().err())
                .cloned()
                .unwrap_or_default();
            return Err(PodcastError::Synthesis(reason));
        }

        enter(PipelineStage::Assembling);
        let podcast = self.assembler.assemble(&clips).await?;

        enter(PipelineStage::Done);
        Ok(podcast)
    }
}

fn enter(stage: PipelineStage) {
    tracing::info!(stage = stage.as_str(), "pipeline stage");
}
