//! Markdown in, typed record out: prompt the model, clean its reply, validate it.

pub mod normalize;
pub mod prompt;
pub mod validate;

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::llm::LanguageModel;
use crate::models::ExtractionTarget;

pub use normalize::normalize;
pub use validate::validate;

#[derive(Clone)]
pub struct ExtractionRequester {
    model: Arc<dyn LanguageModel>,
}

impl ExtractionRequester {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Sends one extraction prompt and returns the model's raw text.
    pub async fn extract(&self, markdown: &str, schema_prompt: &str) -> Result<String> {
        let prompt = prompt::build_prompt(markdown, schema_prompt);
        debug!(model = self.model.name(), chars = prompt.len(), "sending extraction prompt");

        let started = Instant::now();
        let reply = self.model.complete(&prompt).await?;
        debug!(
            model = self.model.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model replied"
        );
        Ok(reply)
    }

    /// Runs the full extraction for a `T` record.
    pub async fn extract_record<T: ExtractionTarget>(&self, markdown: &str, task: &str) -> Result<T> {
        let raw = self.extract(markdown, &prompt::schema_prompt::<T>(task)).await?;
        let json = normalize(&raw)?;
        validate::<T>(&json)
    }
}
