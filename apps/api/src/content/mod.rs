//! Content service: produces section text and outline suggestions.
//!
//! Holds an optional generative backend. Every operation succeeds: when the
//! backend is absent or fails, the deterministic fallback composer answers
//! instead, and the result says which path produced it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::LlmError;
use crate::models::project::DocType;

pub mod fallback;
pub mod handlers;
pub mod outline;
pub mod prompts;

/// A generative text backend. `LlmClient` is the production implementation.
#[async_trait]
pub trait TextBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Output of a content operation, tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    External(T),
    Fallback(T),
}

impl<T> Generated<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Generated::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Generated::External(value) | Generated::Fallback(value) => value,
        }
    }
}

#[derive(Clone, Default)]
pub struct ContentService {
    backend: Option<Arc<dyn TextBackend>>,
}

impl ContentService {
    pub fn new(backend: Option<Arc<dyn TextBackend>>) -> Self {
        Self { backend }
    }

    /// A service that always uses the fallback composer.
    pub fn fallback_only() -> Self {
        Self { backend: None }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn generate_outline(
        &self,
        topic: &str,
        doc_type: DocType,
        item_count: usize,
    ) -> Generated<Vec<String>> {
        let Some(backend) = &self.backend else {
            return Generated::Fallback(outline::default_outline(topic, item_count));
        };

        let prompt = prompts::outline_prompt(
            topic,
            &doc_type.as_str().to_ascii_uppercase(),
            item_count,
        );
        match backend.complete(&prompt).await {
            Ok(raw) => match outline::parse_outline_reply(&raw, item_count) {
                Some(titles) => Generated::External(titles),
                None => {
                    warn!("Outline reply unusable for topic '{topic}', using default headings");
                    Generated::Fallback(outline::default_outline(topic, item_count))
                }
            },
            Err(e) => {
                warn!("Outline generation failed, using default headings: {e}");
                Generated::Fallback(outline::default_outline(topic, item_count))
            }
        }
    }

    pub async fn generate_section(&self, topic: &str, section_title: &str) -> Generated<String> {
        self.complete_or_compose(prompts::section_prompt(topic, section_title))
            .await
    }

    pub async fn refine_section(
        &self,
        topic: &str,
        section_title: &str,
        current_text: &str,
        instruction: &str,
    ) -> Generated<String> {
        self.complete_or_compose(prompts::refine_prompt(
            topic,
            section_title,
            current_text,
            instruction,
        ))
        .await
    }

    async fn complete_or_compose(&self, prompt: String) -> Generated<String> {
        if let Some(backend) = &self.backend {
            match backend.complete(&prompt).await {
                Ok(text) => return Generated::External(text),
                Err(e) => warn!("Text generation failed, using fallback composer: {e}"),
            }
        }
        Generated::Fallback(fallback::compose(&prompt))
    }
}
