//! Speech synthesis for the siniar pipeline.
//!
//! Each dialogue turn is cleaned, routed to one of exactly two voices, and
//! rendered by an external TTS service (ElevenLabs). Turns are independent,
//! so they are synthesized with bounded concurrency; results come back in
//! dialogue order as one [`TurnAudio`] per turn.
//!
//! A failed turn never aborts synthesis of the others. What a failure means
//! for the finished podcast is decided downstream by the assembler.
//!
//! [`TurnAudio`]: siniar_types::TurnAudio

pub mod config;
pub mod error;
pub mod service;
pub mod text;
pub mod tts;
pub mod voices;

pub use config::ElevenLabsConfig;
pub use error::VoiceError;
pub use service::DialogueSynthesizer;
pub use text::clean_text;
pub use tts::{ElevenLabsTts, SpeechSynthesizer};
pub use voices::VoicePair;
