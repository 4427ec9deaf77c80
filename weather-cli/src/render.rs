//! Human-friendly and JSON output for one lookup.

use chrono::Local;
use std::fmt;
use weather_advice_core::{AdviceBundle, WeatherSnapshot};

/// Plain-text report: headline conditions, details, then each kind of advice.
pub struct Report<'a> {
    snapshot: &'a WeatherSnapshot,
    advice: &'a AdviceBundle,
}

impl<'a> Report<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, advice: &'a AdviceBundle) -> Self {
        Self { snapshot, advice }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report { snapshot, advice } = self;
        let observed = snapshot.observation_time.with_timezone(&Local).format("%Y-%m-%d %H:%M");

        writeln!(f, "{} {}, {}", advice.emoji, snapshot.location_name, snapshot.country)?;
        writeln!(f, "{}°C | {}", snapshot.temperature_c, snapshot.condition)?;
        writeln!(f, "Observed {observed} (theme {})", advice.background.hex())?;
        writeln!(f)?;

        writeln!(f, "📊 Details")?;
        writeln!(f, "  - Humidity: {}%", snapshot.humidity_pct)?;
        writeln!(f, "  - Feels like: {}°C", snapshot.feels_like_c)?;
        writeln!(f, "  - UV index: {}", snapshot.uv_index)?;
        if !snapshot.moon_phase.is_empty() {
            writeln!(f, "  - Tonight's moon: {}", snapshot.moon_phase)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", advice.severity.text)?;
        writeln!(f)?;

        writeln!(f, "🏋️ Exercise")?;
        writeln!(f, "  Indoor:  {}", advice.indoor_exercise)?;
        writeln!(f, "  Outdoor: {}", advice.outdoor_exercise)?;
        writeln!(f)?;

        writeln!(f, "👕 Today's outfit")?;
        writeln!(f, "  {}", advice.outfit)?;
        writeln!(f)?;

        writeln!(f, "📍 Good places to go today")?;
        writeln!(f, "  {}", advice.venue.text)
    }
}

pub fn render_json(snapshot: &WeatherSnapshot, advice: &AdviceBundle) -> serde_json::Value {
    serde_json::json!({
        "weather": snapshot,
        "advice": advice,
    })
}
