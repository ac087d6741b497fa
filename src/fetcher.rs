//! Page fetching.
//!
//! A fetcher turns a URL into raw HTML plus a Markdown rendering of the page.
//! Failures never escape a fetcher: they are logged and reported as `None`,
//! and callers treat that as terminal for the request.

pub mod direct;
pub mod render_service;

use async_trait::async_trait;

pub use direct::DirectFetcher;
pub use render_service::RenderServiceFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub markdown: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &str;

    /// Renders `url` live. Returns `None` on any rendering or network failure.
    async fn fetch(&self, url: &str) -> Option<RenderedPage>;
}
