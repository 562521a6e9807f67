//! Podcast assembly: per-turn clips in, one audio file out.
//!
//! Clips are decoded with `symphonia` to mono PCM, concatenated in turn order
//! with a fixed silence gap after every clip (the last one included), and
//! encoded to a uniquely named file in the output directory.
//!
//! Turns whose synthesis failed, or whose clip is missing or empty, are
//! handled by an explicit [`MissingClipPolicy`].

pub mod assembler;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pcm;

pub use assembler::{Podcast, PodcastAssembler};
pub use config::{AssemblyConfig, MissingClipPolicy, OutputFormat};
pub use decode::decode_clip;
pub use encode::{AudioEncoder, Mp3Encoder, WavEncoder};
pub use error::AudioError;
pub use pcm::PcmClip;
