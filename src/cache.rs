//! Process-lifetime cache of the detailed top articles.
//!
//! Filled once, never refreshed. The lock is held for the whole population so
//! concurrent first requests share one pipeline run instead of racing.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::DetailedArticleInfo;
use crate::pipeline::ArticlePipeline;

#[derive(Default)]
pub struct TopArticlesCache {
    entries: Mutex<Option<Vec<DetailedArticleInfo>>>,
}

impl TopArticlesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached records, running the pipeline first if nothing is cached yet.
    ///
    /// Population is all-or-nothing: a failure for any article leaves the cache
    /// empty and the next call starts over.
    pub async fn get_or_populate(&self, pipeline: &ArticlePipeline) -> Result<Vec<DetailedArticleInfo>> {
        let mut entries = self.entries.lock().await;
        if let Some(cached) = entries.as_ref() {
            debug!(count = cached.len(), "serving top articles from cache");
            return Ok(cached.clone());
        }

        let detailed = pipeline.crawl_top_articles().await?;
        info!(count = detailed.len(), "cached top articles");
        *entries = Some(detailed.clone());
        Ok(detailed)
    }

    pub async fn is_populated(&self) -> bool {
        self.entries.lock().await.is_some()
    }

    pub async fn cached_count(&self) -> usize {
        self.entries.lock().await.as_ref().map_or(0, Vec::len)
    }
}
