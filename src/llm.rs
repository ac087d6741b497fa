//! LLM backends. Each one takes a prompt and returns the model's raw text.

pub mod gemini;
pub mod openrouter;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmProvider;
use crate::error::Result;

pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;

    /// Sends a single user prompt. Backend errors propagate unchanged.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub fn from_provider(provider: &LlmProvider) -> Arc<dyn LanguageModel> {
    match provider {
        LlmProvider::Gemini { api_key, model } => {
            Arc::new(GeminiClient::new(api_key.clone(), model.clone()))
        }
        LlmProvider::OpenRouter { api_key, model, site_url, site_name } => Arc::new(
            OpenRouterClient::new(api_key.clone(), model.clone())
                .with_site(site_url.clone(), site_name.clone()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_configured_backend() {
        let openrouter = LlmProvider::OpenRouter {
            api_key: "k".into(),
            model: "deepseek/deepseek-chat-v3-0324".into(),
            site_url: Some("https://news.example".into()),
            site_name: Some("news-crawler".into()),
        };
        assert_eq!(from_provider(&openrouter).name(), "deepseek/deepseek-chat-v3-0324");

        let gemini = LlmProvider::Gemini { api_key: "k".into(), model: "gemini-2.0-flash-exp".into() };
        assert_eq!(from_provider(&gemini).name(), "gemini-2.0-flash-exp");
    }
}
