//! Stub backends and fixtures shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use news_crawler::error::{AppError, Result};
use news_crawler::extraction::ExtractionRequester;
use news_crawler::fetcher::{PageFetcher, RenderedPage};
use news_crawler::llm::LanguageModel;
use news_crawler::pipeline::ArticlePipeline;
use news_crawler::AppState;

pub const FRONT_PAGE_URL: &str = "https://ground.news";
pub const FRONT_PAGE_MARKDOWN: &str = "# Ground News front page\n\n- Story Alpha\n- Story Beta\n- Story Gamma";

/// Serves fixed markdown per URL and counts every fetch.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markdown: &str) -> Self {
        self.pages.insert(url.to_string(), markdown.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, url: &str) -> Option<RenderedPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.pages.get(url).map(|markdown| RenderedPage {
            html: format!("<html><body>{}</body></html>", markdown),
            markdown: markdown.clone(),
        })
    }
}

/// Answers with the reply registered for the first marker found in the prompt.
#[derive(Default)]
pub struct StubModel {
    replies: Vec<(String, std::result::Result<String, String>)>,
    calls: AtomicUsize,
}

impl StubModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, marker: &str, text: &str) -> Self {
        self.replies.push((marker.to_string(), Ok(text.to_string())));
        self
    }

    pub fn fail(mut self, marker: &str, message: &str) -> Self {
        self.replies.push((marker.to_string(), Err(message.to_string())));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    fn name(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (_, reply) = self
            .replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .ok_or_else(|| AppError::LlmError("no stubbed reply for prompt".to_string()))?;
        reply.clone().map_err(AppError::LlmError)
    }
}

pub fn story_url(slug: &str) -> String {
    format!("https://ground.news/article/{}", slug)
}

pub fn story_markdown(slug: &str) -> String {
    format!("# Story {} page\n\nFull text of story {}.", slug, slug)
}

/// Fenced list reply naming alpha, beta and gamma in that order.
pub fn list_reply() -> String {
    format!(
        "```json\n{}\n```",
        serde_json::json!({
            "articles": [
                { "title": "Story Alpha", "date": "06/01/2025", "url": story_url("alpha") },
                { "title": "Story Beta", "date": "06/02/2025", "url": story_url("beta") },
                { "title": "Story Gamma", "date": "06/03/2025", "url": story_url("gamma") }
            ]
        })
    )
}

pub fn detail_reply(slug: &str) -> String {
    format!(
        "```json\n{}\n```",
        serde_json::json!({
            "mainArticleTitle": format!("Story {}", slug),
            "mainArticlePublishedDate": "06/01/2025",
            "mainArticleContent": format!("Full text of story {}.", slug),
            "coveringPublications": [
                { "publicationName": "The Daily", "politicalBias": "Center", "articleTitle": "Coverage" }
            ],
            "overallBiasDistribution": { "leftCount": 1, "centerCount": 2, "rightCount": 0, "centerPercentage": "67%" }
        })
    )
}

/// Fetcher with the front page and the three story pages.
pub fn full_fetcher() -> StubFetcher {
    ["alpha", "beta", "gamma"]
        .iter()
        .fold(
            StubFetcher::new().with_page(FRONT_PAGE_URL, FRONT_PAGE_MARKDOWN),
            |fetcher, slug| fetcher.with_page(&story_url(slug), &story_markdown(slug)),
        )
}

/// Model that answers the front page and all three story pages.
pub fn full_model() -> StubModel {
    ["alpha", "beta", "gamma"].iter().fold(
        StubModel::new().reply(FRONT_PAGE_MARKDOWN, &list_reply()),
        |model, slug| model.reply(&story_markdown(slug), &detail_reply(slug)),
    )
}

pub fn pipeline(fetcher: Arc<StubFetcher>, model: Arc<StubModel>) -> ArticlePipeline {
    ArticlePipeline::new(fetcher, ExtractionRequester::new(model), FRONT_PAGE_URL, 3)
}

pub fn app_state(fetcher: Arc<StubFetcher>, model: Arc<StubModel>) -> AppState {
    AppState::new(pipeline(fetcher, model), None)
}
