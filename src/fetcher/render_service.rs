//! Client for a headless-browser rendering service (crawl4ai-compatible `/crawl`).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::{PageFetcher, RenderedPage};
use crate::error::{AppError, Result};

#[derive(Serialize)]
struct CrawlRequest<'a> {
    urls: [&'a str; 1],
    browser_config: serde_json::Value,
    crawler_config: serde_json::Value,
}

#[derive(Deserialize)]
struct CrawlResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    results: Vec<CrawlResult>,
}

#[derive(Deserialize)]
struct CrawlResult {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    markdown: Option<MarkdownField>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Older service versions return a plain string, newer ones an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum MarkdownField {
    Plain(String),
    Generated { raw_markdown: String },
}

impl MarkdownField {
    fn into_text(self) -> String {
        match self {
            MarkdownField::Plain(text) => text,
            MarkdownField::Generated { raw_markdown } => raw_markdown,
        }
    }
}

fn default_success() -> bool {
    true
}

pub struct RenderServiceFetcher {
    client: Client,
    base_url: String,
}

impl RenderServiceFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            // Browser renders of heavy pages are slow.
            .timeout(Duration::from_secs(180))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request_body(url: &str) -> CrawlRequest<'_> {
        CrawlRequest {
            urls: [url],
            browser_config: json!({
                "type": "BrowserConfig",
                "params": { "headless": true, "java_script_enabled": true }
            }),
            crawler_config: json!({
                "type": "CrawlerRunConfig",
                "params": { "cache_mode": "bypass" }
            }),
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<RenderedPage> {
        let response = self
            .client
            .post(format!("{}/crawl", self.base_url))
            .json(&Self::request_body(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::FetchError(format!("renderer returned {}: {}", status, body)));
        }

        let crawl: CrawlResponse = response.json().await?;
        if !crawl.success {
            return Err(AppError::FetchError("renderer reported failure".to_string()));
        }
        let result = crawl
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::FetchError("renderer returned no results".to_string()))?;
        if !result.success {
            return Err(AppError::FetchError(
                result.error_message.unwrap_or_else(|| "render failed".to_string()),
            ));
        }

        Ok(RenderedPage {
            html: result.html.unwrap_or_default(),
            markdown: result.markdown.map(MarkdownField::into_text).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PageFetcher for RenderServiceFetcher {
    fn name(&self) -> &str {
        "render-service"
    }

    async fn fetch(&self, url: &str) -> Option<RenderedPage> {
        match self.try_fetch(url).await {
            Ok(page) => {
                debug!(url, chars = page.markdown.len(), "rendered page");
                Some(page)
            }
            Err(e) => {
                warn!(url, error = %e, "render failed");
                None
            }
        }
    }
}
