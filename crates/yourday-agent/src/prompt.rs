//! Prompt construction for the daily summary.
//!
//! Pure functions only: the same reading, articles and date always produce
//! byte-identical prompt text.

use yourday_news::NewsArticle;
use yourday_weather::WeatherReading;

/// Characters of each article description carried into the prompt.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Flatten a reading into one line, in temperature, condition, humidity,
/// wind order.
pub fn weather_line(weather: &WeatherReading) -> String {
    format!(
        "Temperature: {}°C, Condition: {}, Humidity: {}%, Wind: {} m/s",
        weather.temperature,
        weather.condition.description(),
        weather.humidity,
        weather.wind_speed
    )
}

/// First [`DESCRIPTION_PREVIEW_CHARS`] characters of `description`.
///
/// Counts chars, so multi-byte text is never cut mid-character.
pub fn truncate_description(description: &str) -> String {
    description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect()
}

/// Numbered listing, one article per line, 1-based in provider order.
pub fn news_listing(articles: &[NewsArticle]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            format!(
                "{}. {} ({}) - {}... URL: {}",
                i + 1,
                article.title,
                article.source,
                truncate_description(&article.description),
                article.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full generation instruction for `date` (`YYYY-MM-DD`).
pub fn build_summary_prompt(
    weather: &WeatherReading,
    articles: &[NewsArticle],
    date: &str,
) -> String {
    format!(
        r#"Generate a well-formatted daily summary in Markdown format for {date}.

Weather data: {weather_info}

Top 10 news headlines:
{news_list}

Format the output as:
# Daily Weather & News

## 🌤 Weather
- Temperature: [value]°C
- Condition: [value]
- Humidity: [value]%
- Wind Speed: [value] m/s

## 📰 Top 10 News
1. **[Headline]** ([Source])
   [Brief description]
   [News Link]([url])

Keep descriptions concise and well-formatted. Return ONLY the markdown content, no additional text."#,
        date = date,
        weather_info = weather_line(weather),
        news_list = news_listing(articles),
    )
}
