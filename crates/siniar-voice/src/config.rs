use serde::{Deserialize, Serialize};
use std::fmt;

fn default_base_url() -> String {
    "https://api.elevenlabs.io/v1/text-to-speech".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_concurrency() -> usize {
    4
}

/// Settings for the ElevenLabs text-to-speech API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Base of the text-to-speech endpoint; `/{voice_id}/stream` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_stability")]
    pub stability: f32,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
    /// Voice used for the first speaker role.
    #[serde(default)]
    pub voice_one_id: String,
    /// Voice used for every other speaker.
    #[serde(default)]
    pub voice_two_id: String,
    /// Per-request deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of turns synthesized at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model_id: default_model_id(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            voice_one_id: String::new(),
            voice_two_id: String::new(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

impl fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("stability", &self.stability)
            .field("similarity_boost", &self.similarity_boost)
            .field("voice_one_id", &self.voice_one_id)
            .field("voice_two_id", &self.voice_two_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ElevenLabsConfig {
    pub fn new(
        api_key: impl Into<String>,
        voice_one_id: impl Into<String>,
        voice_two_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            voice_one_id: voice_one_id.into(),
            voice_two_id: voice_two_id.into(),
            ..Self::default()
        }
    }

    /// Streaming synthesis URL for a voice.
    pub fn stream_url(&self, voice_id: &str) -> String {
        format!("{}/{}/stream", self.base_url.trim_end_matches('/'), voice_id)
    }
}
