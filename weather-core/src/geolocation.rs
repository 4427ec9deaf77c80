//! Device location lookup for the "use my location" mode.
//!
//! A failed or slow lookup is never an error for the caller: [`locate_within`]
//! collapses every failure to `None` so the city input can be used instead.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};

use crate::error::GeolocationError;

pub const DEFAULT_IP_GEOLOCATION_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// `"<lat>,<lon>"`, the form the weather provider accepts as a query.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always answers with the coordinates it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coords: Coordinates,
}

impl FixedGeolocator {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.coords)
    }
}

/// Approximate location from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let res = self.http.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeolocationError::Timeout
            } else {
                GeolocationError::Other(e.to_string())
            }
        })?;

        if res.status() == StatusCode::UNAUTHORIZED || res.status() == StatusCode::FORBIDDEN {
            tracing::debug!("IP geolocation refused with status {}", res.status());
            return Err(GeolocationError::PermissionDenied);
        }

        if !res.status().is_success() {
            tracing::debug!("IP geolocation returned status {}", res.status());
            return Err(GeolocationError::Unavailable);
        }

        let body: IpApiResponse =
            res.json().await.map_err(|e| GeolocationError::Other(e.to_string()))?;

        if body.status != "success" {
            tracing::debug!(
                "IP geolocation failed: {}",
                body.message.as_deref().unwrap_or("no reason given")
            );
            return Err(GeolocationError::Unavailable);
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
            _ => Err(GeolocationError::Unavailable),
        }
    }
}

/// Ask `geolocator` for a position, waiting at most `wait`.
pub async fn locate_within(geolocator: &dyn Geolocator, wait: Duration) -> Option<Coordinates> {
    match tokio::time::timeout(wait, geolocator.locate()).await {
        Ok(Ok(coords)) => {
            tracing::debug!("Located device at {}", coords.to_query());
            Some(coords)
        }
        Ok(Err(e)) => {
            tracing::warn!("Geolocation failed: {}", e);
            None
        }
        Err(_) => {
            tracing::warn!("Geolocation timed out after {:?}", wait);
            None
        }
    }
}
