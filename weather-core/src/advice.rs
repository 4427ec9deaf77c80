//! Rule-based lifestyle advice derived from current conditions.
//!
//! Every temperature table here is a list of lower bounds in strictly
//! descending order, checked with `>=`, first match wins. Reordering an entry
//! silently changes the result, so the tables are kept as plain data next to
//! the type they classify into.

use serde::Serialize;

/// Condition category, chosen by exact match on the provider's condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionClass {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Other,
}

const CONDITION_TABLE: &[(&str, ConditionClass)] = &[
    ("Sunny", ConditionClass::Clear),
    ("Clear", ConditionClass::Clear),
    ("Partly cloudy", ConditionClass::PartlyCloudy),
    ("Cloudy", ConditionClass::Cloudy),
    ("Rain", ConditionClass::Rain),
    ("Snow", ConditionClass::Snow),
    ("Thunderstorm", ConditionClass::Thunderstorm),
];

impl ConditionClass {
    /// Case-sensitive, no normalization; anything unlisted is `Other`.
    pub fn classify(condition: &str) -> Self {
        CONDITION_TABLE
            .iter()
            .find(|(text, _)| *text == condition)
            .map(|(_, class)| *class)
            .unwrap_or(ConditionClass::Other)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ConditionClass::Clear => "☀️",
            ConditionClass::PartlyCloudy => "⛅",
            ConditionClass::Cloudy => "☁️",
            ConditionClass::Rain => "☔",
            ConditionClass::Snow => "☃️",
            ConditionClass::Thunderstorm => "⚡",
            ConditionClass::Other => "🌍",
        }
    }
}

/// Theme hint for the rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Light,
    Default,
}

impl Background {
    /// Light iff the text contains "Sunny" or "Clear"; independent of `ConditionClass`.
    pub fn classify(condition: &str) -> Self {
        if is_bright(condition) {
            Background::Light
        } else {
            Background::Default
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Background::Light => "#f0f8ff",
            Background::Default => "#d3d3d3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Extreme,
    Hot,
    Pleasant,
    Mild,
    Cool,
    Cold,
}

const SEVERITY_THRESHOLDS: &[(f64, SeverityLevel)] = &[
    (35.0, SeverityLevel::Extreme),
    (30.0, SeverityLevel::Hot),
    (20.0, SeverityLevel::Pleasant),
    (10.0, SeverityLevel::Mild),
    (0.0, SeverityLevel::Cool),
];

impl SeverityLevel {
    pub fn from_temperature(temperature_c: f64) -> Self {
        SEVERITY_THRESHOLDS
            .iter()
            .find(|(min, _)| temperature_c >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(SeverityLevel::Cold)
    }

    pub fn message(&self) -> &'static str {
        match self {
            SeverityLevel::Extreme => "🥵 Extremely hot! Avoid going outside.",
            SeverityLevel::Hot => "🔥 Hot weather! Cool indoor exercise is recommended.",
            SeverityLevel::Pleasant => "😊 Warm and great for getting out and about!",
            SeverityLevel::Mild => "🌤️ Mild weather, nice for a light outing.",
            SeverityLevel::Cool => "❄️ Chilly out. Dress warmly.",
            SeverityLevel::Cold => "🥶 Freezing! Bundle up before heading out.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityMessage {
    pub level: SeverityLevel,
    pub text: &'static str,
}

/// The finer temperature band used for exercise and outfit advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// 35 and above
    Sweltering,
    /// 30..35
    Hot,
    /// 25..30
    Warm,
    /// 20..25
    Pleasant,
    /// 15..20
    Mild,
    /// 10..15
    Cool,
    /// 5..10
    Chilly,
    /// 0..5
    Cold,
    /// below 0
    Freezing,
}

const BAND_THRESHOLDS: &[(f64, TemperatureBand)] = &[
    (35.0, TemperatureBand::Sweltering),
    (30.0, TemperatureBand::Hot),
    (25.0, TemperatureBand::Warm),
    (20.0, TemperatureBand::Pleasant),
    (15.0, TemperatureBand::Mild),
    (10.0, TemperatureBand::Cool),
    (5.0, TemperatureBand::Chilly),
    (0.0, TemperatureBand::Cold),
];

impl TemperatureBand {
    pub fn from_temperature(temperature_c: f64) -> Self {
        BAND_THRESHOLDS
            .iter()
            .find(|(min, _)| temperature_c >= *min)
            .map(|(_, band)| *band)
            .unwrap_or(TemperatureBand::Freezing)
    }

    /// `(indoor, outdoor)` exercise suggestion.
    pub fn exercise(&self) -> (&'static str, &'static str) {
        match self {
            TemperatureBand::Sweltering => ("Yoga, pilates, home workout", "❌ Stay indoors"),
            TemperatureBand::Hot => ("Stationary bike, stretching", "Early morning walk"),
            TemperatureBand::Warm => ("Strength training, home workout", "Evening jog, cycling"),
            TemperatureBand::Pleasant => ("Stretching, pilates", "Hiking, tennis"),
            TemperatureBand::Mild => ("Weight training", "Jogging, football"),
            TemperatureBand::Cool => ("Stationary bike", "Light walk"),
            TemperatureBand::Chilly => ("Yoga, stretching", "Short walk"),
            TemperatureBand::Cold => ("Home workout", "❄️ Hiking with cold-weather gear"),
            TemperatureBand::Freezing => ("Stationary bike, yoga", "❌ Stay indoors"),
        }
    }

    pub fn outfit(&self) -> &'static str {
        match self {
            TemperatureBand::Sweltering => "👕 Sleeveless top, 🩳 shorts, 🕶️ sunglasses",
            TemperatureBand::Hot => "👕 T-shirt, 🩳 shorts",
            TemperatureBand::Warm => "👕 Short sleeves, 👖 light trousers",
            TemperatureBand::Pleasant => "👕 Light long sleeves, 👖 jeans",
            TemperatureBand::Mild => "🧥 Light jacket, 👖 long trousers",
            TemperatureBand::Cool => "🧥 Heavy jacket, 🧣 scarf",
            TemperatureBand::Chilly => "🧥 Coat, 🧤 gloves",
            TemperatureBand::Cold => "🧥 Padded jacket, 🧣 scarf, 🧤 gloves",
            TemperatureBand::Freezing => "🧥 Heavy padded jacket, 🧣 scarf, 🧤 gloves, 🧢 hat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueKind {
    Indoor,
    BeachShade,
    ParkTrail,
    TrailCamping,
    MallDining,
}

impl VenueKind {
    /// Condition first: rain or snow always sends people indoors, whatever the temperature.
    pub fn classify(temperature_c: f64, condition: &str) -> Self {
        if condition.contains("Rain") || condition.contains("Snow") {
            VenueKind::Indoor
        } else if is_bright(condition) {
            if temperature_c >= 30.0 {
                VenueKind::BeachShade
            } else if temperature_c >= 20.0 {
                VenueKind::ParkTrail
            } else {
                VenueKind::TrailCamping
            }
        } else {
            VenueKind::MallDining
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            VenueKind::Indoor => "☔ Indoor café, 🏛️ museum, 🎬 cinema",
            VenueKind::BeachShade => "🏖️ Beach (early morning), 🌳 shady park",
            VenueKind::ParkTrail => "🌳 Park, 🏞️ hiking trail, 🚴 bike path",
            VenueKind::TrailCamping => "🏞️ Walking trail, 🏕️ campsite",
            VenueKind::MallDining => "🏢 Shopping mall, 🍽️ food tour, 🎮 indoor activity centre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VenueSuggestion {
    pub kind: VenueKind,
    pub text: &'static str,
}

/// Everything the renderer shows below the headline conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceBundle {
    pub emoji: &'static str,
    pub background: Background,
    pub severity: SeverityMessage,
    pub indoor_exercise: &'static str,
    pub outdoor_exercise: &'static str,
    pub outfit: &'static str,
    pub venue: VenueSuggestion,
}

/// Derive advice from a temperature in °C and the provider's condition text.
///
/// Total over all inputs: a NaN temperature fails every `>=` check and lands
/// in the coldest band.
pub fn derive_advice(temperature_c: f64, condition: &str) -> AdviceBundle {
    let level = SeverityLevel::from_temperature(temperature_c);
    let band = TemperatureBand::from_temperature(temperature_c);
    let (indoor_exercise, outdoor_exercise) = band.exercise();
    let venue = VenueKind::classify(temperature_c, condition);

    AdviceBundle {
        emoji: ConditionClass::classify(condition).emoji(),
        background: Background::classify(condition),
        severity: SeverityMessage { level, text: level.message() },
        indoor_exercise,
        outdoor_exercise,
        outfit: band.outfit(),
        venue: VenueSuggestion { kind: venue, text: venue.suggestion() },
    }
}

fn is_bright(condition: &str) -> bool {
    condition.contains("Sunny") || condition.contains("Clear")
}
