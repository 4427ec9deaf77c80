/// Weather lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The provider answered with an `error` object instead of weather data.
    #[error("Location not found: {message}")]
    LocationNotFound { message: String },

    #[error("Failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Weather provider request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl LookupError {
    pub fn is_location_not_found(&self) -> bool {
        matches!(self, LookupError::LocationNotFound { .. })
    }
}

/// Geolocation errors. None of these are fatal; callers fall back to the city input.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}
