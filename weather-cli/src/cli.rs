use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::Duration;
use weather_advice_core::{
    Config, Coordinates, Geolocator, LookupError, WeatherProvider, WeatherSnapshot,
    alias::aliases,
    config::API_KEY_ENV,
    geolocation::{FixedGeolocator, IpGeolocator, locate_within},
    provider::provider_from_config,
    resolve_query,
};

use crate::render;

pub const LOCATION_NOT_FOUND_MESSAGE: &str =
    "❌ Could not find that city. Try the English name or a different city.";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-advice",
    version,
    about = "Current weather with outfit, exercise and venue advice"
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and default city.
    Configure,

    /// Show weather and advice for a city or the current location.
    Show {
        /// City name in English or Korean (e.g. "Seoul" or "서울").
        /// Defaults to the configured city.
        city: Option<String>,

        /// Use the device's approximate location instead of the city.
        #[arg(long)]
        gps: bool,

        /// Latitude to use instead of looking up the device location.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude to use instead of looking up the device location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the Korean city names that are translated before lookup.
    Aliases,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, gps, lat, lon, json } => {
                let fixed = lat.zip(lon).map(|(latitude, longitude)| Coordinates {
                    latitude,
                    longitude,
                });
                show(city, gps, fixed, json).await
            }
            Command::Aliases => {
                for (local, english) in aliases() {
                    println!("{local}\t{english}");
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = inquire::Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key.trim().to_string());
    config.default_city = Some(default_city.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    gps: bool,
    fixed: Option<Coordinates>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config, std::env::var(API_KEY_ENV).ok())?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());
    let wait = Duration::from_secs(config.geolocation_timeout_secs());

    let fixed_locator = fixed.map(FixedGeolocator::new);
    let ip_locator = IpGeolocator::with_url(config.geolocation_url());
    let geolocator: Option<&dyn Geolocator> = match &fixed_locator {
        Some(locator) => Some(locator as &dyn Geolocator),
        None if gps => Some(&ip_locator as &dyn Geolocator),
        None => None,
    };

    let snapshot = fetch_snapshot(provider.as_ref(), geolocator, &city, wait).await?;
    let advice = snapshot.advice();

    if json {
        let out = serde_json::to_string_pretty(&render::render_json(&snapshot, &advice))
            .context("Failed to serialize output")?;
        println!("{out}");
    } else {
        print!("{}", render::Report::new(&snapshot, &advice));
    }

    Ok(())
}

/// Resolve the query and fetch the snapshot.
///
/// A geolocator that fails or runs past `wait` falls back to `city`; an
/// unknown location becomes [`LOCATION_NOT_FOUND_MESSAGE`].
async fn fetch_snapshot(
    provider: &dyn WeatherProvider,
    geolocator: Option<&dyn Geolocator>,
    city: &str,
    wait: Duration,
) -> anyhow::Result<WeatherSnapshot> {
    let coords = match geolocator {
        Some(geolocator) => {
            let coords = locate_within(geolocator, wait).await;
            if coords.is_none() {
                tracing::info!("Location unavailable, falling back to city '{}'", city);
            }
            coords
        }
        None => None,
    };

    let query = resolve_query(city, coords);

    match provider.get_weather(&query).await {
        Ok(snapshot) => Ok(snapshot),
        Err(LookupError::LocationNotFound { message }) => {
            tracing::debug!("Provider could not resolve '{}': {}", query, message);
            anyhow::bail!(LOCATION_NOT_FOUND_MESSAGE)
        }
        Err(e) => Err(e).context("Weather lookup failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_advice_core::provider::weatherapi::WeatherApiProvider;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn forecast_body(name: &str) -> serde_json::Value {
        serde_json::json!({
            "location": {"name": name, "country": "South Korea"},
            "current": {
                "temp_c": 24.0,
                "feelslike_c": 25.0,
                "humidity": 60,
                "uv": 5.0,
                "condition": {"text": "Sunny"}
            },
            "forecast": {"forecastday": [{"astro": {"moon_phase": "New Moon"}}]}
        })
    }

    #[tokio::test]
    async fn unknown_location_becomes_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 1006, "message": "No matching location found."}
            })))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let err = fetch_snapshot(&provider, None, "Atlantis", Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), LOCATION_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn failed_geolocation_falls_back_to_alias_mapped_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .and(query_param("q", "Seoul"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Seoul")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let geolocator = IpGeolocator::with_url(format!("{}/json", server.uri()));
        let snapshot = fetch_snapshot(&provider, Some(&geolocator), "서울", Duration::from_secs(5))
            .await
            .expect("falls back to the city");

        assert_eq!(snapshot.location_name, "Seoul");
    }

    #[tokio::test]
    async fn located_coordinates_are_sent_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .and(query_param("q", "35.1796,129.0756"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Busan")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let geolocator =
            FixedGeolocator::new(Coordinates { latitude: 35.1796, longitude: 129.0756 });
        let snapshot = fetch_snapshot(&provider, Some(&geolocator), "서울", Duration::from_secs(5))
            .await
            .expect("lookup by coordinates");

        assert_eq!(snapshot.location_name, "Busan");
    }

    #[tokio::test]
    async fn other_provider_errors_keep_their_cause() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let err = fetch_snapshot(&provider, None, "Seoul", Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Weather lookup failed");
        assert!(matches!(
            err.downcast_ref::<LookupError>(),
            Some(LookupError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn show_defaults() {
        let cli = Cli::parse_from(["weather-advice", "show"]);
        match cli.command {
            Command::Show { city, gps, lat, lon, json } => {
                assert!(city.is_none());
                assert!(!gps);
                assert!(lat.is_none() && lon.is_none());
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn show_accepts_korean_city_and_flags() {
        let cli = Cli::parse_from(["weather-advice", "-v", "show", "부산", "--gps", "--json"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Show { city, gps, json, .. } => {
                assert_eq!(city.as_deref(), Some("부산"));
                assert!(gps);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli =
            Cli::parse_from(["weather-advice", "show", "--lat", "-33.87", "--lon", "151.21"]);
        match cli.command {
            Command::Show { lat, lon, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        let err = Cli::try_parse_from(["weather-advice", "show", "--lat", "37.5"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn aliases_subcommand_parses() {
        let cli = Cli::parse_from(["weather-advice", "aliases"]);
        assert!(matches!(cli.command, Command::Aliases));
    }
}
