use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Tomorrow's conditions for the configured city.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReading {
    /// OpenWeather group name, e.g. "Rain" or "Clouds".
    pub condition: String,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    pub temperature_celsius: f64,
    /// Start of the chosen 3-hour slot in the city's local time.
    pub timestamp: DateTime<FixedOffset>,
}

/// Inclusive `(min, max)` bound on an audio feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    pub min: f32,
    pub max: f32,
}

impl FeatureRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodDescriptor {
    pub label: &'static str,
    pub seed_genres: Vec<String>,
    pub energy: FeatureRange,
    pub valence: FeatureRange,
    pub tempo: FeatureRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub title: String,
    pub primary_artist: ArtistRef,
    pub artists: Vec<String>,
    pub popularity: u32,
}

impl Track {
    pub fn artist_line(&self) -> String {
        if self.artists.is_empty() {
            self.primary_artist.name.clone()
        } else {
            self.artists.join(", ")
        }
    }
}

pub type TrackBatch = Vec<Track>;

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: String,
    pub title: String,
    pub artists: String,
    pub popularity: u32,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTrack {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
}

impl ApiTrack {
    /// Local files and unavailable items come back without an id or artists.
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        let first = self.artists.first()?;
        let primary_artist = ArtistRef {
            id: first.id.clone().unwrap_or_else(|| first.name.to_lowercase()),
            name: first.name.clone(),
        };

        Some(Track {
            id,
            uri: self.uri,
            title: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
            primary_artist,
            popularity: self.popularity,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracks {
    pub items: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
}

// OpenWeather payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSlot>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: Option<String>,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub dt: i64,
    pub main: SlotMain,
    #[serde(default)]
    pub weather: Vec<SlotWeather>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWeather {
    pub main: String,
    #[serde(default)]
    pub description: String,
}
