use siniar_types::SpeakerRoles;

/// The two synthesis voices. There is no third voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePair {
    pub voice_one: String,
    pub voice_two: String,
}

impl VoicePair {
    pub fn new(voice_one: impl Into<String>, voice_two: impl Into<String>) -> Self {
        Self {
            voice_one: voice_one.into(),
            voice_two: voice_two.into(),
        }
    }

    /// Picks the voice for a speaker: the first role gets voice one, any
    /// other value (including unknown names) gets voice two.
    pub fn select(&self, roles: &SpeakerRoles, speaker: &str) -> &str {
        if roles.is_first(speaker) {
            &self.voice_one
        } else {
            &self.voice_two
        }
    }
}
