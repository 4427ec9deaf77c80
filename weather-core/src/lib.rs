//! Core library for the `weather-advice` CLI.
//!
//! This crate defines:
//! - The rule-based advice engine (outfit, exercise, venue, severity)
//! - Configuration & credentials handling
//! - Abstraction over the weather provider and device geolocation
//! - Shared domain models (queries, snapshots)
//!
//! It is used by `weather-advice-cli`, but the advice engine has no I/O and
//! can be reused on its own.

pub mod advice;
pub mod alias;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;

pub use advice::{AdviceBundle, derive_advice};
pub use alias::resolve_alias;
pub use config::Config;
pub use error::{GeolocationError, LookupError};
pub use geolocation::{Coordinates, Geolocator};
pub use model::{LocationQuery, WeatherSnapshot, resolve_query};
pub use provider::WeatherProvider;
