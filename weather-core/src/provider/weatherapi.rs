use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::LookupError,
    model::{LocationQuery, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LookupError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<WeatherSnapshot, LookupError> {
        let url = format!("{}/v1/forecast.json", self.base_url.trim_end_matches('/'));
        let q = query.as_query_string();

        tracing::debug!("Requesting WeatherAPI forecast for q={}", q);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", "1"),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        // Unknown locations come back as HTTP 400 with an `error` object, so the
        // body is inspected before the status.
        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(LookupError::Status {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                });
            }
            Err(e) => return Err(LookupError::Decode(e)),
        };

        if let Some(error) = value.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("no matching location")
                .to_string();
            tracing::debug!("WeatherAPI returned error for q={}: {}", q, truncate_body(&body));
            return Err(LookupError::LocationNotFound { message });
        }

        if !status.is_success() {
            return Err(LookupError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: WaForecastResponse = serde_json::from_value(value)?;
        Ok(parsed.into_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    uv: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    moon_phase: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    astro: WaAstro,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: Option<WaForecast>,
}

impl WaForecastResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let ts = self.current.last_updated_epoch.or(self.location.localtime_epoch);
        let observation_time = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

        let moon_phase = self
            .forecast
            .and_then(|f| f.forecastday.into_iter().next())
            .map(|day| day.astro.moon_phase)
            .unwrap_or_default();

        WeatherSnapshot {
            location_name: self.location.name,
            country: self.location.country,
            temperature_c: self.current.temp_c,
            feels_like_c: self.current.feelslike_c,
            condition: self.current.condition.text,
            humidity_pct: self.current.humidity,
            uv_index: self.current.uv,
            moon_phase,
            observation_time,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, LookupError> {
        self.fetch_forecast(query).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
