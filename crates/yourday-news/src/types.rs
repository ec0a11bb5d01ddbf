use serde::{Deserialize, Serialize};

/// A single headline, in the order the provider ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
}

/// GNews top-headlines response body.
#[derive(Debug, Deserialize)]
pub(crate) struct HeadlinesResponse {
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: String,
    pub source: ApiSource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSource {
    pub name: String,
}

impl From<ApiArticle> for NewsArticle {
    fn from(api: ApiArticle) -> Self {
        Self {
            title: api.title,
            description: api.description,
            url: api.url,
            source: api.source.name,
            published_at: api.published_at,
        }
    }
}
