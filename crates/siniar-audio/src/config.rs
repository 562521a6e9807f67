use serde::{Deserialize, Serialize};

fn default_gap_ms() -> u64 {
    500
}

fn default_ffmpeg_binary() -> String {
    "ffmpeg".to_string()
}

fn default_mp3_bitrate() -> String {
    "128k".to_string()
}

fn default_encode_timeout_secs() -> u64 {
    120
}

fn default_sample_rate() -> u32 {
    44_100
}

/// What to do with a turn that has no usable audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingClipPolicy {
    /// Refuse to assemble; the request fails listing the affected turns.
    #[default]
    Fail,
    /// Treat the turn as a zero-length clip. Its gap is still inserted.
    Silence,
}

/// Container of the final podcast file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// MP3 via an `ffmpeg` subprocess.
    #[default]
    Mp3,
    /// 16-bit PCM WAV, written in-process.
    Wav,
}

/// Assembly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Silence inserted after every clip (milliseconds).
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,
    #[serde(default)]
    pub missing_clip_policy: MissingClipPolicy,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_ffmpeg_binary")]
    pub ffmpeg_binary: String,
    #[serde(default = "default_mp3_bitrate")]
    pub mp3_bitrate: String,
    #[serde(default = "default_encode_timeout_secs")]
    pub encode_timeout_secs: u64,
    /// Sample rate used when no clip could be decoded.
    #[serde(default = "default_sample_rate")]
    pub fallback_sample_rate: u32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            gap_ms: default_gap_ms(),
            missing_clip_policy: MissingClipPolicy::default(),
            output_format: OutputFormat::default(),
            ffmpeg_binary: default_ffmpeg_binary(),
            mp3_bitrate: default_mp3_bitrate(),
            encode_timeout_secs: default_encode_timeout_secs(),
            fallback_sample_rate: default_sample_rate(),
        }
    }
}
