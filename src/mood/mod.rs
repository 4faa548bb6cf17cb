//! # Mood Module
//!
//! Turns tomorrow's forecast into a [`MoodDescriptor`]: a handful of seed
//! genres plus energy, valence and tempo ranges that steer the track query.
//!
//! The mapping is a rule table evaluated top to bottom; the first rule whose
//! condition matches wins. Every forecast matches at least the final
//! "moderate" rule, so [`map_mood`] is total.
//!
//! | Rule    | Matches                              | Seeds                             |
//! |---------|--------------------------------------|-----------------------------------|
//! | rainy   | "rain" or "drizzle"                  | lo-fi, acoustic, indie-folk       |
//! | cloudy  | "cloud"                              | alternative, indie-rock, electronic |
//! | sunny   | "clear" and at least 22 °C           | pop, dance, edm, tropical-house   |
//! | stormy  | "thunder"                            | trip-hop, alt-rock, dark-pop      |
//! | snowy   | "snow"                               | acoustic, singer-songwriter, folk |
//! | hazy    | "mist", "fog" or "haze"              | lo-fi, chill, downtempo           |
//! | cold    | at most 5 °C                         | ambient, classical, chill         |
//! | moderate| anything else                        | indie-pop, rock, pop              |
//!
//! Rainy is checked before stormy so a "thunderstorm with light rain" still
//! gets the rain set.

mod genres;

pub use genres::{FALLBACK_SEEDS, MAX_SEEDS, SEED_GENRES, is_seed_genre, sanitize_seed_genres};

use crate::types::{FeatureRange, ForecastReading, MoodDescriptor};

pub const HOT_THRESHOLD_CELSIUS: f64 = 22.0;
pub const COLD_THRESHOLD_CELSIUS: f64 = 5.0;

struct MoodRule {
    label: &'static str,
    matches: fn(&str, f64) -> bool,
    genres: &'static [&'static str],
    energy: FeatureRange,
    valence: FeatureRange,
    tempo: FeatureRange,
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

const RULES: &[MoodRule] = &[
    MoodRule {
        label: "rainy",
        matches: |text, _| mentions(text, &["rain", "drizzle"]),
        genres: &["lo-fi", "acoustic", "indie-folk"],
        energy: FeatureRange::new(0.2, 0.4),
        valence: FeatureRange::new(0.3, 0.5),
        tempo: FeatureRange::new(70.0, 95.0),
    },
    MoodRule {
        label: "cloudy",
        matches: |text, _| text.contains("cloud"),
        genres: &["alternative", "indie-rock", "electronic"],
        energy: FeatureRange::new(0.4, 0.6),
        valence: FeatureRange::new(0.45, 0.65),
        tempo: FeatureRange::new(95.0, 115.0),
    },
    MoodRule {
        label: "sunny",
        matches: |text, temp| temp >= HOT_THRESHOLD_CELSIUS && text.contains("clear"),
        genres: &["pop", "dance", "edm", "tropical-house"],
        energy: FeatureRange::new(0.7, 0.9),
        valence: FeatureRange::new(0.6, 0.9),
        tempo: FeatureRange::new(115.0, 135.0),
    },
    MoodRule {
        label: "stormy",
        matches: |text, _| text.contains("thunder"),
        genres: &["trip-hop", "alt-rock", "dark-pop"],
        energy: FeatureRange::new(0.5, 0.7),
        valence: FeatureRange::new(0.2, 0.4),
        tempo: FeatureRange::new(90.0, 115.0),
    },
    MoodRule {
        label: "snowy",
        matches: |text, _| text.contains("snow"),
        genres: &["acoustic", "singer-songwriter", "folk"],
        energy: FeatureRange::new(0.3, 0.5),
        valence: FeatureRange::new(0.4, 0.6),
        tempo: FeatureRange::new(70.0, 100.0),
    },
    MoodRule {
        label: "hazy",
        matches: |text, _| mentions(text, &["mist", "fog", "haze"]),
        genres: &["lo-fi", "chill", "downtempo"],
        energy: FeatureRange::new(0.25, 0.5),
        valence: FeatureRange::new(0.35, 0.55),
        tempo: FeatureRange::new(70.0, 95.0),
    },
    MoodRule {
        label: "cold",
        matches: |_, temp| temp <= COLD_THRESHOLD_CELSIUS,
        genres: &["ambient", "classical", "chill"],
        energy: FeatureRange::new(0.2, 0.45),
        valence: FeatureRange::new(0.3, 0.5),
        tempo: FeatureRange::new(60.0, 90.0),
    },
];

static MODERATE: MoodRule = MoodRule {
    label: "moderate",
    matches: |_, _| true,
    genres: &["indie-pop", "rock", "pop"],
    energy: FeatureRange::new(0.55, 0.75),
    valence: FeatureRange::new(0.55, 0.8),
    tempo: FeatureRange::new(100.0, 120.0),
};

/// Derives the mood for a forecast. Pure and total.
pub fn map_mood(forecast: &ForecastReading) -> MoodDescriptor {
    let text = if forecast.description.trim().is_empty() {
        forecast.condition.to_lowercase()
    } else {
        forecast.description.to_lowercase()
    };
    let temp = forecast.temperature_celsius;

    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(&text, temp))
        .unwrap_or(&MODERATE);

    MoodDescriptor {
        label: rule.label,
        seed_genres: sanitize_seed_genres(rule.genres),
        energy: rule.energy,
        valence: rule.valence,
        tempo: rule.tempo,
    }
}
