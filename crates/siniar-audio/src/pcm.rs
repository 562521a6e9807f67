use std::time::Duration;

/// Mono PCM audio, samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl PcmClip {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn silence(sample_rate: u32, duration: Duration) -> Self {
        Self::new(sample_rate, vec![0.0; samples_for(sample_rate, duration)])
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Number of samples covering `duration` at `sample_rate`.
pub fn samples_for(sample_rate: u32, duration: Duration) -> usize {
    (sample_rate as u128 * duration.as_millis() / 1000) as usize
}

/// Concatenates clips in order, appending `gap` of silence after each one.
pub fn concat_with_gaps<'a, I>(clips: I, sample_rate: u32, gap: Duration) -> PcmClip
where
    I: IntoIterator<Item = &'a PcmClip>,
{
    let gap_samples = samples_for(sample_rate, gap);
    let mut samples = Vec::new();
    for clip in clips {
        samples.extend_from_slice(&clip.samples);
        samples.resize(samples.len() + gap_samples, 0.0);
    }
    PcmClip::new(sample_rate, samples)
}
