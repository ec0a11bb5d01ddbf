//! Forward geocoding: convert a place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use yourday_core::{ReqwestErrorExt, WeatherError};

use crate::types::Location;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent or null when nothing matches
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
}

/// Resolve `name` to the coordinates of the first match.
pub async fn geocode(client: &Client, url: &str, name: &str) -> Result<Location, WeatherError> {
    let unreachable = |e: reqwest::Error| {
        WeatherError::Unreachable(format!("Failed to geocode location: {}", e.describe()))
    };

    let response = client
        .get(url)
        .query(&[
            ("name", name),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ])
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(unreachable)?;

    let body = response.text().await.map_err(unreachable)?;

    let parsed: GeocodingResponse = serde_json::from_str(&body)
        .map_err(|e| WeatherError::MalformedResponse(format!("geocoding: {}", e)))?;

    let first = parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))?;

    let location = Location {
        latitude: first.latitude,
        longitude: first.longitude,
        name: first.name,
    };

    tracing::info!(
        "Geocoded {} to {} ({}, {})",
        name,
        location.name.as_deref().unwrap_or(name),
        location.latitude,
        location.longitude
    );

    Ok(location)
}
