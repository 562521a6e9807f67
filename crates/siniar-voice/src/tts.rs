use crate::config::ElevenLabsConfig;
use crate::error::VoiceError;
use crate::text::clean_text;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Maximum text input size for TTS (64 KiB). Prevents resource exhaustion from
/// oversized synthesis requests.
const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

/// Upper bound on how much of an error body is kept.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Converts one line of text into encoded audio with a given voice.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns the encoded audio bytes for `text` spoken by `voice_id`.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError>;

    /// Synthesizes `text` and writes the audio to `dest`, returning the number
    /// of bytes written.
    async fn synthesize_to(&self, text: &str, voice_id: &str, dest: &Path) -> Result<u64, VoiceError> {
        let audio = self.synthesize(text, voice_id).await?;
        if audio.is_empty() {
            return Err(VoiceError::Tts("service returned no audio".to_string()));
        }
        tokio::fs::write(dest, &audio).await?;
        Ok(audio.len() as u64)
    }
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// ElevenLabs streaming text-to-speech client.
#[derive(Debug, Clone)]
pub struct ElevenLabsTts {
    config: ElevenLabsConfig,
    http: Client,
}

impl ElevenLabsTts {
    pub fn new(config: ElevenLabsConfig) -> Result<Self, VoiceError> {
        if config.api_key.trim().is_empty() {
            return Err(VoiceError::Config(
                "ElevenLabs API key is not configured. Set elevenlabs.api_key in config \
                 or the ELEVENLABS_API_KEY environment variable."
                    .to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VoiceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ElevenLabsConfig {
        &self.config
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsTts {
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return Err(VoiceError::EmptyText);
        }
        if cleaned.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::Tts(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                cleaned.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }

        let body = SynthesisRequest {
            text: &cleaned,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let response = tokio::time::timeout(
            deadline,
            self.http
                .post(self.config.stream_url(voice_id))
                .header("xi-api-key", &self.config.api_key)
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| VoiceError::Timeout(self.config.timeout_secs))?
        .map_err(|e| {
            if e.is_timeout() {
                VoiceError::Timeout(self.config.timeout_secs)
            } else {
                VoiceError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VoiceError::Synthesis {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let audio = tokio::time::timeout(deadline, response.bytes())
            .await
            .map_err(|_| VoiceError::Timeout(self.config.timeout_secs))?
            .map_err(|e| VoiceError::Http(format!("failed to read audio stream: {}", e)))?;

        tracing::debug!(bytes = audio.len(), "speech synthesized");
        Ok(audio.to_vec())
    }
}
