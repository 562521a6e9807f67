#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Writes a 16-bit WAV tone with `frames` frames per channel.
pub fn write_tone(dir: &Path, name: &str, sample_rate: u32, channels: u16, frames: usize) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..frames {
        let value = if i % 2 == 0 { 8_000i16 } else { -8_000i16 };
        for _ in 0..channels {
            writer.write_sample(value).unwrap();
        }
    }
    writer.finalize().unwrap();
    path
}

/// Reads back a WAV file's frame count and sample rate.
pub fn wav_frames(path: &Path) -> (u32, u32) {
    let reader = hound::WavReader::open(path).unwrap();
    (reader.duration(), reader.spec().sample_rate)
}

/// Samples per MPEG-1 Layer III frame.
pub const MP3_FRAME_SAMPLES: usize = 1_152;

/// Builds `frames` silent MPEG-1 Layer III frames: 128 kbps, 44.1 kHz, mono,
/// no CRC. Zeroed side info means every granule decodes to silence.
pub fn mp3_silence(frames: usize) -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];
    // 144 * 128_000 / 44_100, no padding
    const FRAME_LEN: usize = 417;

    let mut data = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        data.extend_from_slice(&HEADER);
        data.resize(data.len() + FRAME_LEN - HEADER.len(), 0);
    }
    data
}

pub fn write_mp3_silence(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, mp3_silence(frames)).unwrap();
    path
}
