//! The daily run: weather, news, generation, publication, strictly in that
//! order.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use yourday_core::{AgentError, AppError, NewsError, VaultError, WeatherError};
use yourday_news::{NewsArticle, NewsClient};
use yourday_vault::VaultClient;
use yourday_weather::{WeatherProvider, WeatherReading};

use crate::model::BedrockModel;
use crate::prompt::build_summary_prompt;

/// Headlines requested per run.
pub const NEWS_LIMIT: usize = 10;

/// Vault folder that receives the daily notes.
pub const VAULT_FOLDER: &str = "YourDayStart";

const PREVIEW_CHARS: usize = 200;

/// Source of the current weather reading.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(&self) -> Result<WeatherReading, WeatherError>;
}

/// Source of ranked headlines.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_top_news(&self, limit: usize) -> Result<Vec<NewsArticle>, NewsError>;
}

/// Single-shot text generation from an instruction prompt.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Destination for the finished note.
#[async_trait]
pub trait VaultWriter: Send + Sync {
    async fn put_content(&self, file_path: &str, content: &str) -> Result<(), VaultError>;
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    async fn fetch_weather(&self) -> Result<WeatherReading, WeatherError> {
        WeatherProvider::fetch_weather(self).await
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn fetch_top_news(&self, limit: usize) -> Result<Vec<NewsArticle>, NewsError> {
        NewsClient::fetch_top_news(self, limit).await
    }
}

#[async_trait]
impl SummaryModel for BedrockModel {
    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        self.complete(prompt).await
    }
}

#[async_trait]
impl VaultWriter for VaultClient {
    async fn put_content(&self, file_path: &str, content: &str) -> Result<(), VaultError> {
        VaultClient::put_content(self, file_path, content).await
    }
}

/// Generated note and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDocument {
    pub path: String,
    pub content: String,
}

/// Vault path of the note for `date`.
pub fn summary_path(date: NaiveDate) -> String {
    format!("{}/Daily Summary-{}.md", VAULT_FOLDER, date.format("%Y-%m-%d"))
}

/// Orchestrates one daily run over the four stage adapters.
pub struct DailySummaryAgent<W, N, M, V> {
    weather: W,
    news: N,
    model: M,
    vault: V,
}

impl<W, N, M, V> DailySummaryAgent<W, N, M, V>
where
    W: WeatherSource,
    N: NewsSource,
    M: SummaryModel,
    V: VaultWriter,
{
    pub fn new(weather: W, news: N, model: M, vault: V) -> Self {
        Self {
            weather,
            news,
            model,
            vault,
        }
    }

    /// Run for today's local date and return the vault path written.
    pub async fn run(&self) -> Result<String, AppError> {
        self.run_for_date(Local::now().date_naive()).await
    }

    /// Run for `date`. Stage errors are returned as their own kind.
    pub async fn run_for_date(&self, date: NaiveDate) -> Result<String, AppError> {
        let document = self.generate_document(date).await?;

        self.vault
            .put_content(&document.path, &document.content)
            .await?;

        tracing::info!("Posted daily summary to {}", document.path);
        Ok(document.path)
    }

    /// Stages 1-3: collect data and generate the note, without publishing.
    pub async fn generate_document(&self, date: NaiveDate) -> Result<SummaryDocument, AppError> {
        let weather = self.weather.fetch_weather().await?;
        let articles = self.news.fetch_top_news(NEWS_LIMIT).await?;

        let today = date.format("%Y-%m-%d").to_string();
        let path = summary_path(date);

        let prompt = build_summary_prompt(&weather, &articles, &today);
        tracing::debug!("Prompt is {} chars", prompt.chars().count());

        let content = self.model.generate(&prompt).await?;

        tracing::info!("Generated content ({} chars)", content.chars().count());
        tracing::debug!("Preview: {}", preview(&content));

        Ok(SummaryDocument { path, content })
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}
