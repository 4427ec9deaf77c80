use crate::{
    Config, LocationQuery, WeatherSnapshot, error::LookupError,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the WeatherAPI provider from config.
///
/// `env_api_key` is the value of `WEATHER_API_KEY`, if set; it wins over the file.
pub fn provider_from_config(
    config: &Config,
    env_api_key: Option<String>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key(env_api_key)?;
    let timeout = Duration::from_secs(config.http_timeout_secs());

    let provider = WeatherApiProvider::new(api_key).with_timeout(timeout)?;
    Ok(Box::new(provider))
}
