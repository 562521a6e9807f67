use crate::coerce::coerce_dialogue;
use crate::config::SamplingParams;
use crate::error::DialogueError;
use crate::prompt::PromptTemplate;
use async_trait::async_trait;
use siniar_types::Dialogue;
use std::sync::Arc;

/// A generative text model: prompt and sampling settings in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, DialogueError>;
}

/// Turns source text into a dialogue by prompting a model once and coercing
/// its reply.
#[derive(Clone)]
pub struct DialogueGenerator {
    model: Arc<dyn TextGenerator>,
    template: PromptTemplate,
    params: SamplingParams,
}

impl DialogueGenerator {
    pub fn new(model: Arc<dyn TextGenerator>, template: PromptTemplate, params: SamplingParams) -> Self {
        Self {
            model,
            template,
            params,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Generates a dialogue for `source_text`.
    ///
    /// Returns [`DialogueError::Empty`] when the reply holds no usable turns,
    /// whether because no array was found or because every turn was blank.
    #[tracing::instrument(skip_all, fields(source_len = source_text.len()))]
    pub async fn generate(&self, source_text: &str) -> Result<Dialogue, DialogueError> {
        let prompt = self.template.render(source_text);
        let reply = self.model.generate(&prompt, &self.params).await?;

        let dialogue = coerce_dialogue(&reply)?;
        if dialogue.is_empty() {
            return Err(DialogueError::Empty);
        }

        tracing::info!(turns = dialogue.len(), "dialogue generated");
        Ok(dialogue)
    }
}
