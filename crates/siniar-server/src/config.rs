//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use siniar_audio::AssemblyConfig;
use siniar_dialogue::GeminiConfig;
use siniar_types::{RetryPolicy, SpeakerRoles};
use siniar_voice::ElevenLabsConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where temporary documents, turn clips and podcasts are written.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Language model connection.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Speech synthesis connection and voices.
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// Dialogue language and speaker roles.
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Podcast assembly.
    #[serde(default)]
    pub assembly: AssemblyConfig,

    /// Backoff for retried outbound calls.
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Document text extraction.
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "siniar_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Storage directories.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Uploaded documents, removed after extraction.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Per-turn clips. Never cleaned up by the server.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// Finished podcasts. Never cleaned up by the server.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Spoken language the dialogue is written in.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub speakers: SpeakerRoles,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Deadline for extracting one document, in seconds.
    #[serde(default = "default_extraction_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("temp_files")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("podcast_audio")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("final_output")
}

fn default_language() -> String {
    "Bahasa Indonesia".to_string()
}

fn default_extraction_timeout_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            audio_dir: default_audio_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            speakers: SpeakerRoles::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_extraction_timeout_secs(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `GENAI_API_KEY` overrides `gemini.api_key`
/// - `ELEVENLABS_API_KEY` overrides `elevenlabs.api_key`
/// - `ELEVENLABS_URL` overrides `elevenlabs.base_url`
/// - `VOICE_ONE_ID` / `VOICE_TWO_ID` override `elevenlabs.voice_one_id` / `voice_two_id`
/// - `SINIAR_HOST` overrides `server.host`
/// - `SINIAR_PORT` overrides `server.port`
/// - `SINIAR_LOG_LEVEL` overrides `logging.level`
/// - `SINIAR_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides looked up by variable name. Unparseable values are
/// ignored.
pub fn apply_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = var("GENAI_API_KEY") {
        config.gemini.api_key = key;
    }
    if let Some(key) = var("ELEVENLABS_API_KEY") {
        config.elevenlabs.api_key = key;
    }
    if let Some(url) = var("ELEVENLABS_URL") {
        config.elevenlabs.base_url = url;
    }
    if let Some(voice) = var("VOICE_ONE_ID") {
        config.elevenlabs.voice_one_id = voice;
    }
    if let Some(voice) = var("VOICE_TWO_ID") {
        config.elevenlabs.voice_two_id = voice;
    }
    if let Some(host) = var("SINIAR_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("SINIAR_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = var("SINIAR_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("SINIAR_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
