#![allow(dead_code)]

use async_trait::async_trait;
use siniar_audio::OutputFormat;
use siniar_dialogue::{DialogueError, SamplingParams, TextGenerator};
use siniar_document::{DocumentExtractor, ExtractError};
use siniar_server::config::Config;
use siniar_server::pipeline::PodcastPipeline;
use siniar_server::{app, AppState};
use siniar_types::RetryPolicy;
use siniar_voice::{SpeechSynthesizer, VoiceError};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SAMPLE_RATE: u32 = 16_000;
/// Every fake clip is 0.1 s long.
pub const CLIP_FRAMES: usize = 1_600;

pub const TWO_TURNS: &str = r#"[{"speaker":"Nadya","line":"Halo!"},{"speaker":"Alif","line":"Hai juga!"}]"#;

/// Extractor with a fixed answer that records what it was given.
pub struct FakeExtractor {
    answer: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    /// Path of each call and whether the file existed at that moment.
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl FakeExtractor {
    pub fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(reason.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok("late".to_string()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

impl DocumentExtractor for FakeExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.answer.clone().map_err(ExtractError::Open)
    }
}

/// Model that always replies with the same text.
pub struct ScriptedModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate(&self, prompt: &str, _params: &SamplingParams) -> Result<String, DialogueError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Speech service returning a short WAV tone per line.
#[derive(Default)]
pub struct FakeTts {
    calls: Mutex<Vec<(String, String)>>,
    /// Text -> (remaining failures, status).
    failures: Mutex<HashMap<String, (u32, u16)>>,
}

impl FakeTts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the next `times` requests for `text` fail with `status`.
    pub fn fail(self: &Arc<Self>, text: &str, times: u32, status: u16) -> Arc<Self> {
        self.failures
            .lock()
            .unwrap()
            .insert(text.to_string(), (times, status));
        self.clone()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeTts {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string()));

        if let Some((remaining, status)) = self.failures.lock().unwrap().get_mut(text) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(VoiceError::Synthesis {
                    status: *status,
                    body: "scripted failure".to_string(),
                });
            }
        }

        Ok(tone(CLIP_FRAMES))
    }
}

/// 16-bit mono WAV bytes.
pub fn tone(frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            writer
                .write_sample(if i % 2 == 0 { 4_000i16 } else { -4_000i16 })
                .unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Configuration rooted in a temporary directory, writing WAV so no
/// external encoder is needed.
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.storage.temp_dir = root.join("temp_files");
    config.storage.audio_dir = root.join("podcast_audio");
    config.storage.output_dir = root.join("final_output");
    config.elevenlabs.voice_one_id = "voice-one".to_string();
    config.elevenlabs.voice_two_id = "voice-two".to_string();
    config.assembly.output_format = OutputFormat::Wav;
    config.extraction.timeout_secs = 1;
    config.retry = RetryPolicy {
        max_attempts: 2,
        initial_delay_ms: 1,
        max_delay_ms: 2,
    };
    config
}

pub struct Harness {
    pub root: tempfile::TempDir,
    pub config: Config,
    pub extractor: Arc<FakeExtractor>,
    pub model: Arc<ScriptedModel>,
    pub tts: Arc<FakeTts>,
}

impl Harness {
    pub fn new(reply: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        Self {
            root,
            config,
            extractor: FakeExtractor::returning("isi dokumen"),
            model: ScriptedModel::new(reply),
            tts: FakeTts::new(),
        }
    }

    pub fn pipeline(&self) -> PodcastPipeline {
        PodcastPipeline::from_config(
            &self.config,
            self.extractor.clone(),
            self.model.clone(),
            self.tts.clone(),
        )
    }

    pub fn app(&self) -> axum::Router {
        app(AppState {
            pipeline: Arc::new(self.pipeline()),
            max_upload_bytes: self.config.server.max_upload_bytes,
        })
    }

    pub fn files_in(&self, dir: &Path) -> Vec<PathBuf> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}
