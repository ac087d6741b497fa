use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ArticleQuery {
    pub url: Option<String>,
}

impl ArticleQuery {
    /// The `url` parameter, treating an empty value as absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
