//! WeatherAPI provider against a local mock server.

use weather_advice_core::{
    Coordinates, LocationQuery, LookupError, WeatherProvider, advice::SeverityLevel,
    provider::weatherapi::WeatherApiProvider, resolve_query,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn forecast_body(name: &str, temp_c: f64, condition: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {"name": name, "country": "South Korea", "localtime_epoch": 1_700_000_000},
        "current": {
            "last_updated_epoch": 1_700_000_000,
            "temp_c": temp_c,
            "feelslike_c": temp_c + 1.5,
            "humidity": 48,
            "uv": 7.0,
            "condition": {"text": condition}
        },
        "forecast": {"forecastday": [{"astro": {"moon_phase": "Full Moon"}}]}
    })
}

#[tokio::test]
async fn fetches_and_parses_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "Seoul"))
        .and(query_param("days", "1"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Seoul", 32.0, "Sunny")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let snapshot = provider
        .get_weather(&resolve_query("서울", None))
        .await
        .expect("lookup should succeed");

    assert_eq!(snapshot.location_name, "Seoul");
    assert_eq!(snapshot.country, "South Korea");
    assert_eq!(snapshot.temperature_c, 32.0);
    assert_eq!(snapshot.feels_like_c, 33.5);
    assert_eq!(snapshot.humidity_pct, 48.0);
    assert_eq!(snapshot.uv_index, 7.0);
    assert_eq!(snapshot.moon_phase, "Full Moon");

    let advice = snapshot.advice();
    assert_eq!(advice.emoji, "☀️");
    assert_eq!(advice.severity.level, SeverityLevel::Hot);
}

#[tokio::test]
async fn coordinates_are_sent_as_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "35.1796,129.0756"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Busan", 18.0, "Cloudy")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let query = LocationQuery::Coordinates(Coordinates { latitude: 35.1796, longitude: 129.0756 });
    let snapshot = provider.get_weather(&query).await.expect("lookup should succeed");

    assert_eq!(snapshot.location_name, "Busan");
}

#[tokio::test]
async fn error_body_is_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })))
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let err = provider
        .get_weather(&LocationQuery::City("Atlantis".into()))
        .await
        .unwrap_err();

    match err {
        LookupError::LocationNotFound { message } => {
            assert_eq!(message, "No matching location found.");
        }
        other => panic!("expected LocationNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn error_field_wins_even_with_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": {"code": 1006}
        })))
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let err = provider
        .get_weather(&LocationQuery::City("Nowhere".into()))
        .await
        .unwrap_err();

    assert!(err.is_location_not_found());
}

#[tokio::test]
async fn server_error_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let err = provider
        .get_weather(&LocationQuery::City("Seoul".into()))
        .await
        .unwrap_err();

    match err {
        LookupError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {"name": "Seoul"}
        })))
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::with_base_url("TEST_KEY".into(), server.uri());
    let err = provider
        .get_weather(&LocationQuery::City("Seoul".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)), "got {err:?}");
}
