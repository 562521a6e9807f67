//! Chooses the source text for a request: an uploaded document, or a topic.

use crate::error::PodcastError;
use siniar_document::DocumentExtractor;
use siniar_types::{retry, PipelineStage, RetryPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where the source text of a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Document,
    Topic,
}

impl TextSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Topic => "topic",
        }
    }
}

/// Source text ready for the dialogue generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    pub source: TextSource,
    pub text: String,
}

pub struct TextSourceResolver {
    extractor: Arc<dyn DocumentExtractor>,
    temp_dir: PathBuf,
    timeout: Duration,
    retry: RetryPolicy,
}

impl TextSourceResolver {
    pub fn new(
        extractor: Arc<dyn DocumentExtractor>,
        temp_dir: impl Into<PathBuf>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            extractor,
            temp_dir: temp_dir.into(),
            timeout,
            retry,
        }
    }

    /// A non-empty document wins over the topic. A topic that is empty or
    /// whitespace-only counts as absent; otherwise it is used verbatim.
    pub async fn resolve(
        &self,
        document: Option<&[u8]>,
        topic: Option<&str>,
    ) -> Result<ResolvedText, PodcastError> {
        if let Some(bytes) = document.filter(|b| !b.is_empty()) {
            let text = self.extract_document(bytes).await?;
            return Ok(ResolvedText {
                source: TextSource::Document,
                text,
            });
        }

        match topic {
            Some(topic) if !topic.trim().is_empty() => Ok(ResolvedText {
                source: TextSource::Topic,
                text: topic.to_string(),
            }),
            _ => Err(PodcastError::MissingInput),
        }
    }

    /// Persists the upload to a uniquely named temporary file and extracts
    /// it. The file is removed when this function returns, on every path.
    async fn extract_document(&self, bytes: &[u8]) -> Result<String, PodcastError> {
        tokio::fs::create_dir_all(&self.temp_dir)
            .await
            .map_err(|e| PodcastError::Internal(format!("failed to create temp dir: {}", e)))?;

        let file = tempfile::Builder::new()
            .prefix("temp_")
            .suffix(".pdf")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| PodcastError::Internal(format!("failed to create temp file: {}", e)))?;

        tokio::fs::write(file.path(), bytes)
            .await
            .map_err(|e| PodcastError::Internal(format!("failed to write temp file: {}", e)))?;

        tracing::debug!(path = %file.path().display(), bytes = bytes.len(), "document stored for extraction");

        let text = retry(
            &self.retry,
            "extract_document",
            |e: &PodcastError| matches!(e, PodcastError::UpstreamTimeout { .. }),
            || self.extract_once(file.path()),
        )
        .await?;

        tracing::info!(chars = text.chars().count(), "document text extracted");
        Ok(text)
    }

    /// A timed-out extraction keeps its blocking thread until the extractor
    /// returns on its own; each retry occupies another one.
    async fn extract_once(&self, path: &Path) -> Result<String, PodcastError> {
        let extractor = self.extractor.clone();
        let path = path.to_path_buf();
        let task = tokio::task::spawn_blocking(move || extractor.extract_text(&path));

        match tokio::time::timeout(self.timeout, task).await {
            Err(_) => Err(PodcastError::UpstreamTimeout {
                stage: PipelineStage::Extracting,
            }),
            Ok(Err(e)) => Err(PodcastError::Internal(format!("extraction task failed: {}", e))),
            Ok(Ok(result)) => result.map_err(PodcastError::from),
        }
    }
}
