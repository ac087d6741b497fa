//! Plain HTTP fetch with a local HTML to Markdown conversion.
//!
//! Used when no rendering service is configured. Pages are not executed, so
//! content injected by JavaScript is missing.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use super::{PageFetcher, RenderedPage};
use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_default()
});

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("body is a valid selector")
});

static NOISE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script, style, noscript, svg, template").expect("noise selector is valid")
});

#[derive(Debug, Clone, Default)]
pub struct DirectFetcher;

impl DirectFetcher {
    pub fn new() -> Self {
        Self
    }

    async fn try_fetch(&self, url: &str) -> Result<RenderedPage> {
        let response = CLIENT
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;

        let body = extract_body(&html)
            .ok_or_else(|| AppError::FetchError("No <body> tag found in the HTML".to_string()))?;
        let markdown = format_markdown(&html2md::parse_html(&strip_noise(&body)));

        Ok(RenderedPage { html, markdown })
    }
}

#[async_trait]
impl PageFetcher for DirectFetcher {
    fn name(&self) -> &str {
        "direct"
    }

    async fn fetch(&self, url: &str) -> Option<RenderedPage> {
        match self.try_fetch(url).await {
            Ok(page) => {
                debug!(url, chars = page.markdown.len(), "fetched page");
                Some(page)
            }
            Err(e) => {
                warn!(url, error = %e, "direct fetch failed");
                None
            }
        }
    }
}

pub fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document.select(&BODY_SELECTOR)
        .next()
        .map(|element| element.inner_html())
}

/// Removes elements that carry no readable text.
fn strip_noise(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let mut cleaned = fragment.to_string();
    for element in document.select(&NOISE_SELECTOR) {
        let outer = element.html();
        if let Some(pos) = cleaned.find(&outer) {
            cleaned.replace_range(pos..pos + outer.len(), "");
        }
    }
    cleaned
}

/// Trims every line and collapses runs of blank lines into one.
pub fn format_markdown(markdown: &str) -> String {
    let mut result = String::with_capacity(markdown.len());
    let mut pending_blank = false;

    for line in markdown.lines() {
        let trimmed = line.trim_end();
        if trimmed.trim().is_empty() {
            pending_blank = !result.is_empty();
            continue;
        }
        if pending_blank {
            result.push_str("\n\n");
        } else if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(trimmed);
        pending_blank = false;
    }

    result
}
