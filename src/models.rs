//! Records extracted from rendered pages.
//!
//! Field names follow the camelCase JSON the model is asked to produce and the
//! API serves back unchanged.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A news article discovered on the aggregator front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleListItem {
    pub title: String,
    pub date: String,
    pub url: String,
}

/// Newest articles in the order the model returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArticlesList {
    pub articles: Vec<ArticleListItem>,
}

/// One outlet's coverage of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoveringPublication {
    pub publication_name: String,
    pub political_bias: Option<String>,
    pub article_title: String,
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallBiasDistribution {
    pub left_count: Option<i64>,
    pub center_count: Option<i64>,
    pub right_count: Option<i64>,
    pub left_percentage: Option<String>,
    pub center_percentage: Option<String>,
    pub right_percentage: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedArticleInfo {
    pub main_article_title: String,
    pub main_article_published_date: Option<String>,
    pub main_article_updated_date: Option<String>,
    pub main_article_content: Option<String>,
    pub covering_publications: Option<Vec<CoveringPublication>>,
    pub overall_bias_distribution: Option<OverallBiasDistribution>,
}

/// A record type the model can be asked to extract from page markdown.
pub trait ExtractionTarget: DeserializeOwned + JsonSchema + Send {
    /// What to pull out of the page.
    fn task() -> String;

    /// Compact description of the JSON shape, in the style models follow best.
    fn shape() -> &'static str;

    fn extraction_schema() -> serde_json::Value {
        serde_json::to_value(schema_for!(Self)).unwrap_or(serde_json::Value::Null)
    }
}

impl ExtractionTarget for ArticlesList {
    fn task() -> String {
        "extract the newest articles listed on the page, newest first".to_string()
    }

    fn shape() -> &'static str {
        "{articles: [{title: str, date: mm/dd/yyyy, url: str}]}"
    }
}

impl ExtractionTarget for DetailedArticleInfo {
    fn task() -> String {
        "extract the main article (title, dates, full content), every publication covering \
         the story with its political bias, and the overall bias distribution of the coverage"
            .to_string()
    }

    fn shape() -> &'static str {
        "{mainArticleTitle: str, mainArticlePublishedDate: mm/dd/yyyy | null, \
         mainArticleUpdatedDate: mm/dd/yyyy | null, mainArticleContent: str | null, \
         coveringPublications: [{publicationName: str, politicalBias: str | null, \
         articleTitle: str, publishedDate: mm/dd/yyyy | null}] | null, \
         overallBiasDistribution: {leftCount: int | null, centerCount: int | null, \
         rightCount: int | null, leftPercentage: str | null, centerPercentage: str | null, \
         rightPercentage: str | null, summary: str | null} | null}"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detailed_info_uses_camel_case() {
        let info = DetailedArticleInfo {
            main_article_title: "Title".into(),
            main_article_published_date: None,
            main_article_updated_date: None,
            main_article_content: Some("Body".into()),
            covering_publications: Some(vec![CoveringPublication {
                publication_name: "Daily".into(),
                political_bias: Some("Center".into()),
                article_title: "Story".into(),
                published_date: None,
            }]),
            overall_bias_distribution: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["mainArticleTitle"], "Title");
        assert_eq!(json["coveringPublications"][0]["publicationName"], "Daily");
        assert!(json["overallBiasDistribution"].is_null());
    }

    #[test]
    fn schema_lists_required_fields() {
        let schema = DetailedArticleInfo::extraction_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::json!("mainArticleTitle")]);

        let schema = ArticlesList::extraction_schema();
        assert_eq!(schema["required"], serde_json::json!(["articles"]));
        assert!(schema["definitions"]["ArticleListItem"].is_object());
    }
}
