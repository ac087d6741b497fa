use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use reqwest::Client;
use tracing::debug;

use super::LanguageModel;
use crate::error::{Result, AppError};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai";

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: OPENROUTER_BASE_URL.to_string(),
            site_url: None,
            site_name: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attribution headers OpenRouter shows on its leaderboards.
    pub fn with_site(mut self, site_url: Option<String>, site_name: Option<String>) -> Self {
        self.site_url = site_url;
        self.site_name = site_name;
        self
    }
}

#[async_trait]
impl LanguageModel for OpenRouterClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message { role: "user", content: prompt }],
        };

        let mut request = self
            .client
            .post(format!("{}/api/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        // Add optional headers if provided
        if let Some(url) = &self.site_url {
            request = request.header("HTTP-Referer", url);
        }

        if let Some(name) = &self.site_name {
            request = request.header("X-Title", name);
        }

        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::LlmError(format!("{}: {}", status, text)));
        }

        let json: ChatResponse = res.json().await?;
        let reply = json
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?;

        debug!(model = %self.model, chars = reply.len(), "openrouter completion");
        Ok(reply)
    }
}
