use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use yourday_core::{ReqwestErrorExt, WeatherError};

use crate::geocode::{geocode, GEOCODING_URL};
use crate::types::{Location, WeatherCondition, WeatherReading};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: i32,
    wind_speed_10m: f64,
}

/// Open-Meteo client bound to a configured location.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    location: String,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherProvider {
    pub fn new(location: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_urls(location, GEOCODING_URL, FORECAST_URL)
    }

    /// Point the provider at alternative geocoding and forecast endpoints.
    pub fn with_base_urls(
        location: impl Into<String>,
        geocoding_url: &str,
        forecast_url: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            location: location.into(),
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
        })
    }

    /// Fetch current weather for the configured location.
    pub async fn fetch_weather(&self) -> Result<WeatherReading, WeatherError> {
        self.fetch_weather_for(&self.location).await
    }

    /// Geocode `name`, then fetch current conditions there.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather_for(&self, name: &str) -> Result<WeatherReading, WeatherError> {
        let location = geocode(&self.client, &self.geocoding_url, name).await?;
        self.current(&location).await
    }

    /// Fetch current conditions at resolved coordinates.
    pub async fn current(&self, location: &Location) -> Result<WeatherReading, WeatherError> {
        let unreachable = |e: reqwest::Error| {
            WeatherError::Unreachable(format!("Failed to fetch weather data: {}", e.describe()))
        };

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("wind_speed_unit", "ms".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unreachable)?;

        let body = response.text().await.map_err(unreachable)?;

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("forecast: {}", e)))?;

        let current = parsed.current;
        let reading = WeatherReading {
            temperature: current.temperature_2m,
            condition: WeatherCondition::from_wmo_code(current.weather_code),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
        };

        tracing::debug!(?reading, "Fetched current weather");
        Ok(reading)
    }
}
