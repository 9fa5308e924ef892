use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{ArticleSummary, DomainError, Encyclopedia};
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Encyclopedia backed by the MediaWiki search API
///
/// A single query call resolves the top-ranked pages together with their
/// plain-text intro extracts.
#[derive(Debug)]
pub struct WikipediaClient<C: HttpClientTrait> {
    client: C,
    api_url: String,
}

impl<C: HttpClientTrait> WikipediaClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_api_url(client, DEFAULT_WIKIPEDIA_API_URL)
    }

    pub fn with_api_url(client: C, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<ArticleSummary>, DomainError> {
        let response: SearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("wikipedia", format!("Failed to parse response: {}", e))
        })?;

        // MediaWiki omits the query object entirely when nothing matches.
        let Some(query) = response.query else {
            return Ok(Vec::new());
        };

        // Pages arrive keyed by page id; the index field carries search rank.
        let mut pages: Vec<SearchPage> = query.pages.into_values().collect();
        pages.sort_by_key(|page| page.index.unwrap_or(u32::MAX));

        Ok(pages
            .into_iter()
            .map(|page| ArticleSummary::new(page.title, page.extract.unwrap_or_default()))
            .collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> Encyclopedia for WikipediaClient<C> {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ArticleSummary>, DomainError> {
        let limit_param = limit.to_string();
        let params = vec![
            ("action", "query"),
            ("format", "json"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrlimit", limit_param.as_str()),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
        ];

        let json = self.client.get_json(&self.api_url, params).await?;
        let mut articles = self.parse_response(json)?;
        articles.truncate(limit);

        Ok(articles)
    }

    fn provider_name(&self) -> &'static str {
        "wikipedia"
    }
}

// MediaWiki API types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    pages: HashMap<String, SearchPage>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    title: String,
    extract: Option<String>,
    index: Option<u32>,
}
