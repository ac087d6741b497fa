pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fetcher;
pub mod llm;
pub mod models;
pub mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use cache::TopArticlesCache;
use config::Config;
use extraction::ExtractionRequester;
use fetcher::{DirectFetcher, PageFetcher, RenderServiceFetcher};
use pipeline::ArticlePipeline;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ArticlePipeline>,
    pub cache: Arc<TopArticlesCache>,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(pipeline: ArticlePipeline, request_timeout: Option<Duration>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            cache: Arc::new(TopArticlesCache::new()),
            request_timeout,
        }
    }

    /// Wires the configured rendering and LLM backends together.
    pub fn from_config(config: &Config) -> Self {
        let fetcher: Arc<dyn PageFetcher> = match &config.renderer_url {
            Some(url) => Arc::new(RenderServiceFetcher::new(url.clone())),
            None => Arc::new(DirectFetcher::new()),
        };
        let model = llm::from_provider(&config.llm);
        tracing::info!(fetcher = fetcher.name(), model = model.name(), "pipeline backends ready");

        let pipeline = ArticlePipeline::new(
            fetcher,
            ExtractionRequester::new(model),
            config.front_page_url.clone(),
            config.top_articles,
        );
        Self::new(pipeline, config.request_timeout)
    }
}
