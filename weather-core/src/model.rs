use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    advice::{AdviceBundle, derive_advice},
    alias::resolve_alias,
    geolocation::Coordinates,
};

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Value for the provider's `q` parameter.
    pub fn as_query_string(&self) -> String {
        match self {
            LocationQuery::City(name) => name.clone(),
            LocationQuery::Coordinates(coords) => coords.to_query(),
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_query_string())
    }
}

/// Build the provider query. Coordinates win when present; otherwise the
/// city input goes through the alias table.
pub fn resolve_query(city_input: &str, gps: Option<Coordinates>) -> LocationQuery {
    match gps {
        Some(coords) => LocationQuery::Coordinates(coords),
        None => LocationQuery::City(resolve_alias(city_input).to_string()),
    }
}

/// Current conditions for one location, as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: f64,
    pub uv_index: f64,
    pub moon_phase: String,
    pub observation_time: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn advice(&self) -> AdviceBundle {
        derive_advice(self.temperature_c, &self.condition)
    }
}
