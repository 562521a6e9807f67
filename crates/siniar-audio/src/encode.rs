//! Encoders for the final podcast file.

use crate::config::AssemblyConfig;
use crate::error::AudioError;
use crate::pcm::PcmClip;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Writes PCM audio to a file in some container format.
#[async_trait]
pub trait AudioEncoder: Send + Sync {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// MIME type served with the file.
    fn content_type(&self) -> &'static str;

    async fn encode(&self, pcm: &PcmClip, dest: &Path) -> Result<(), AudioError>;
}

/// Writes 16-bit mono WAV.
pub(crate) fn write_wav(pcm: &PcmClip, dest: &Path) -> Result<(), AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: pcm.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let encode_err = |e: hound::Error| AudioError::Encode(format!("wav: {}", e));
    let mut writer = hound::WavWriter::create(dest, spec).map_err(encode_err)?;
    for sample in &pcm.samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value).map_err(encode_err)?;
    }
    writer.finalize().map_err(encode_err)
}

/// In-process WAV encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavEncoder;

#[async_trait]
impl AudioEncoder for WavEncoder {
    fn extension(&self) -> &'static str {
        "wav"
    }

    fn content_type(&self) -> &'static str {
        "audio/wav"
    }

    async fn encode(&self, pcm: &PcmClip, dest: &Path) -> Result<(), AudioError> {
        let pcm = pcm.clone();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || write_wav(&pcm, &dest))
            .await
            .map_err(|e| AudioError::Encode(format!("encoder task failed: {}", e)))?
    }
}

/// MP3 encoder that hands a temporary WAV to `ffmpeg`.
#[derive(Debug, Clone)]
pub struct Mp3Encoder {
    ffmpeg_binary: PathBuf,
    bitrate: String,
    timeout: Duration,
}

impl Mp3Encoder {
    pub fn new(ffmpeg_binary: impl Into<PathBuf>, bitrate: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_binary: ffmpeg_binary.into(),
            bitrate: bitrate.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AssemblyConfig) -> Self {
        Self::new(
            &config.ffmpeg_binary,
            &config.mp3_bitrate,
            Duration::from_secs(config.encode_timeout_secs),
        )
    }
}

#[async_trait]
impl AudioEncoder for Mp3Encoder {
    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn content_type(&self) -> &'static str {
        "audio/mpeg"
    }

    async fn encode(&self, pcm: &PcmClip, dest: &Path) -> Result<(), AudioError> {
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        // Removed when dropped, whether or not ffmpeg succeeds.
        let wav = tempfile::Builder::new()
            .prefix("podcast_pcm_")
            .suffix(".wav")
            .tempfile_in(dir)
            .map_err(|e| AudioError::io(dir, e))?;

        let pcm_owned = pcm.clone();
        let wav_path = wav.path().to_path_buf();
        tokio::task::spawn_blocking(move || write_wav(&pcm_owned, &wav_path))
            .await
            .map_err(|e| AudioError::Encode(format!("encoder task failed: {}", e)))??;

        let mut command = Command::new(&self.ffmpeg_binary);
        command
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(wav.path())
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg("-b:a")
            .arg(&self.bitrate)
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| AudioError::Encode(format!("Failed to spawn ffmpeg: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AudioError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| AudioError::Encode(format!("Failed to wait for ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioError::Encode(format!("ffmpeg failed: {}", stderr.trim())));
        }

        Ok(())
    }
}
