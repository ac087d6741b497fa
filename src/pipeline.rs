use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::extraction::ExtractionRequester;
use crate::fetcher::{PageFetcher, RenderedPage};
use crate::models::{ArticlesList, DetailedArticleInfo, ExtractionTarget};

/// Fetch, then extract. One sequential pass per call, nothing retried.
#[derive(Clone)]
pub struct ArticlePipeline {
    fetcher: Arc<dyn PageFetcher>,
    requester: ExtractionRequester,
    front_page_url: String,
    top_articles: usize,
}

impl ArticlePipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        requester: ExtractionRequester,
        front_page_url: impl Into<String>,
        top_articles: usize,
    ) -> Self {
        Self {
            fetcher,
            requester,
            front_page_url: front_page_url.into(),
            top_articles,
        }
    }

    async fn fetch(&self, url: &str) -> Result<RenderedPage> {
        self.fetcher
            .fetch(url)
            .await
            .ok_or_else(|| AppError::FetchError(url.to_string()))
    }

    /// Newest articles on the front page, in the order the model listed them.
    #[instrument(skip(self), fields(url = %self.front_page_url))]
    pub async fn crawl_articles_list(&self) -> Result<ArticlesList> {
        let page = self.fetch(&self.front_page_url).await?;
        let task = format!("{}, at most {}", ArticlesList::task(), self.top_articles);
        let list: ArticlesList = self.requester.extract_record(&page.markdown, &task).await?;
        info!(count = list.articles.len(), "extracted article list");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn crawl_article(&self, url: &str) -> Result<DetailedArticleInfo> {
        let page = self.fetch(url).await?;
        let info: DetailedArticleInfo = self
            .requester
            .extract_record(&page.markdown, &DetailedArticleInfo::task())
            .await?;
        info!(
            title = %info.main_article_title,
            publications = info.covering_publications.as_ref().map_or(0, Vec::len),
            "extracted article"
        );
        Ok(info)
    }

    /// Details for the first `top_articles` list entries, fetched one after another.
    /// The first failure aborts the whole batch.
    pub async fn crawl_top_articles(&self) -> Result<Vec<DetailedArticleInfo>> {
        let list = self.crawl_articles_list().await?;
        let mut detailed = Vec::with_capacity(self.top_articles);
        for article in list.articles.iter().take(self.top_articles) {
            detailed.push(self.crawl_article(&article.url).await?);
        }
        Ok(detailed)
    }
}
