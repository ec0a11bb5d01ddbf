//! Integration tests for WeatherProvider using wiremock.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yourday_core::WeatherError;
use yourday_weather::{WeatherCondition, WeatherProvider};

fn provider_for(server: &MockServer, location: &str) -> WeatherProvider {
    WeatherProvider::with_base_urls(
        location,
        &format!("{}/v1/search", server.uri()),
        &format!("{}/v1/forecast", server.uri()),
    )
    .unwrap()
}

async fn mount_geocode_berlin(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Berlin"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Berlin", "latitude": 52.52, "longitude": 13.41, "country": "Germany" }
            ],
            "generationtime_ms": 0.5
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn forecast_body(code: i32) -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.41,
        "current": {
            "time": "2025-06-01T09:00",
            "temperature_2m": 21.4,
            "relative_humidity_2m": 58,
            "weather_code": code,
            "wind_speed_10m": 3.2
        }
    })
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("wind_speed_unit", "ms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(61)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, "Berlin");
    let reading = provider.fetch_weather().await.unwrap();

    assert_eq!(reading.temperature, 21.4);
    assert_eq!(reading.condition, WeatherCondition::LightRain);
    assert_eq!(reading.humidity, 58.0);
    assert_eq!(reading.wind_speed, 3.2);
}

#[tokio::test]
async fn test_unmapped_code_is_unknown() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(77)))
        .mount(&server)
        .await;

    let reading = provider_for(&server, "Berlin").fetch_weather().await.unwrap();
    assert_eq!(reading.condition, WeatherCondition::Unknown);
}

#[tokio::test]
async fn test_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
        )
        .mount(&server)
        .await;

    // The forecast endpoint must never be called
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider_for(&server, "Atlantis")
        .fetch_weather()
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::LocationNotFound(ref loc) if loc == "Atlantis"));
    assert_eq!(err.to_string(), "Location not found: Atlantis");
}

#[tokio::test]
async fn test_empty_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server, "Nowhere").fetch_weather().await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(_)));
}

#[tokio::test]
async fn test_null_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": null })))
        .mount(&server)
        .await;

    let err = provider_for(&server, "Atlantis").fetch_weather().await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(ref loc) if loc == "Atlantis"));
    assert_eq!(err.to_string(), "Location not found: Atlantis");
}

#[tokio::test]
async fn test_geocoder_server_error_is_unreachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider_for(&server, "Berlin").fetch_weather().await.unwrap_err();
    assert!(matches!(err, WeatherError::Unreachable(_)));
    assert!(err.to_string().contains("503"), "{}", err);
}

#[tokio::test]
async fn test_missing_current_field_is_malformed() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "temperature_2m": 21.4,
                "weather_code": 0,
                "wind_speed_10m": 3.2
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server, "Berlin").fetch_weather().await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
    assert!(err.to_string().contains("relative_humidity_2m"), "{}", err);
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let provider = WeatherProvider::with_base_urls(
        "Berlin",
        &format!("{}/v1/search", uri),
        &format!("{}/v1/forecast", uri),
    )
    .unwrap();

    let err = provider.fetch_weather().await.unwrap_err();
    assert!(matches!(err, WeatherError::Unreachable(_)));
}
