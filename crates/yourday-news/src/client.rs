//! GNews top-headlines client.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use yourday_core::{NewsError, ReqwestErrorExt};

use crate::types::{HeadlinesResponse, NewsArticle};

pub const GNEWS_API_BASE: &str = "https://gnews.io/api/v4";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct NewsClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl NewsClient {
    pub fn new(api_key: &str) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, GNEWS_API_BASE)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NewsError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch up to `limit` English top headlines, in provider order.
    ///
    /// A single entry with a missing field fails the whole call.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_top_news(&self, limit: usize) -> Result<Vec<NewsArticle>, NewsError> {
        // The request URL carries the API token, keep it out of messages
        let unreachable = |e: reqwest::Error| {
            NewsError::Unreachable(format!(
                "Failed to fetch news data: {}",
                e.without_url().describe()
            ))
        };

        let url = format!("{}/top-headlines", self.base_url);
        let max = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("token", self.api_key.as_str()),
                ("lang", "en"),
                ("max", max.as_str()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unreachable)?;

        let body = response.text().await.map_err(unreachable)?;

        let parsed: HeadlinesResponse = serde_json::from_str(&body)
            .map_err(|e| NewsError::MalformedResponse(e.to_string()))?;

        let articles: Vec<NewsArticle> = parsed
            .articles
            .into_iter()
            .take(limit)
            .map(NewsArticle::from)
            .collect();

        tracing::info!("Fetched {} headlines", articles.len());
        Ok(articles)
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
