use siniar_types::SpeakerRoles;

fn default_language() -> String {
    "Bahasa Indonesia".to_string()
}

/// The fixed instruction sent ahead of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Spoken language of the dialogue.
    pub language: String,
    pub roles: SpeakerRoles,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            language: default_language(),
            roles: SpeakerRoles::default(),
        }
    }
}

impl PromptTemplate {
    pub fn new(language: impl Into<String>, roles: SpeakerRoles) -> Self {
        Self {
            language: language.into(),
            roles,
        }
    }

    /// Renders the prompt for the given source text. The text is appended
    /// verbatim, even when empty.
    pub fn render(&self, source_text: &str) -> String {
        format!(
            "Kamu adalah seorang penulis naskah podcast profesional yang menulis dalam {language}.\n\
             Tugasmu adalah membuat dialog singkat bergaya podcast antara dua pembicara: {first} dan {second}.\n\
             Gunakan gaya santai sehari-hari. Balasanmu harus berupa JSON array dengan field 'speaker' dan 'line'.\n\
             Berdasarkan informasi berikut:\n\
             \n\
             {source_text}\n",
            language = self.language,
            first = self.roles.first,
            second = self.roles.second,
        )
    }
}
