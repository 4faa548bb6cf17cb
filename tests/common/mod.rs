#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{FixedOffset, TimeZone};
use moodify::{
    error::{SpotifyError, WeatherError},
    spotify::{PlaylistService, TrackCatalog},
    types::{ArtistRef, ForecastReading, MoodDescriptor, Track},
    weather::ForecastSource,
};

pub fn track(id: &str, artist: &str, popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        title: format!("Song {}", id),
        primary_artist: ArtistRef {
            id: artist.to_string(),
            name: artist.to_uppercase(),
        },
        artists: vec![artist.to_uppercase()],
        popularity,
    }
}

/// `per_artist` tracks for each of `artists` artists.
pub fn pool(artists: usize, per_artist: usize) -> Vec<Track> {
    (0..artists * per_artist)
        .map(|i| {
            track(
                &format!("t{}", i),
                &format!("artist{}", i % artists),
                (i * 7 % 100) as u32,
            )
        })
        .collect()
}

pub fn reading(description: &str, temperature_celsius: f64) -> ForecastReading {
    ForecastReading {
        condition: String::new(),
        description: description.to_string(),
        temperature_celsius,
        timestamp: FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 2, 12, 0, 0)
            .unwrap(),
    }
}

pub enum Recommendations {
    Tracks(Vec<Track>),
    Status(u16),
    Unauthorized,
}

/// In-memory Spotify that records every call.
pub struct FakeSpotify {
    pub recommendations: Recommendations,
    pub search_results: Vec<Track>,
    pub failing_genres: Vec<String>,
    /// Every search answers 401.
    pub unauthorized_search: bool,
    /// Playlist writes answer 500.
    pub failing_writes: bool,
    pub recommendation_calls: Mutex<Vec<u32>>,
    pub search_calls: Mutex<Vec<(String, u32, u32)>>,
    pub writes: Mutex<Vec<(&'static str, Vec<String>)>>,
}

impl FakeSpotify {
    pub fn new(recommendations: Recommendations, search_results: Vec<Track>) -> Self {
        Self {
            recommendations,
            search_results,
            failing_genres: Vec::new(),
            unauthorized_search: false,
            failing_writes: false,
            recommendation_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    fn write_result(&self, snapshot: &str) -> Result<Option<String>, SpotifyError> {
        if self.failing_writes {
            return Err(SpotifyError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(Some(snapshot.to_string()))
    }
}

impl TrackCatalog for FakeSpotify {
    async fn recommendations(
        &self,
        _mood: &MoodDescriptor,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        self.recommendation_calls.lock().unwrap().push(limit);
        match &self.recommendations {
            Recommendations::Tracks(tracks) => Ok(tracks.clone()),
            Recommendations::Status(status) => Err(SpotifyError::Status {
                status: *status,
                body: "upstream error".to_string(),
            }),
            Recommendations::Unauthorized => Err(SpotifyError::Unauthorized),
        }
    }

    async fn search_genre(
        &self,
        genre: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        self.search_calls
            .lock()
            .unwrap()
            .push((genre.to_string(), offset, limit));

        if self.unauthorized_search {
            return Err(SpotifyError::Unauthorized);
        }
        if self.failing_genres.iter().any(|g| g == genre) {
            return Err(SpotifyError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }

        Ok(self.search_results.clone())
    }
}

impl PlaylistService for FakeSpotify {
    async fn replace_items(
        &self,
        _playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError> {
        self.writes.lock().unwrap().push(("PUT", uris.to_vec()));
        self.write_result("snap-1")
    }

    async fn append_items(
        &self,
        _playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError> {
        self.writes.lock().unwrap().push(("POST", uris.to_vec()));
        self.write_result("snap-2")
    }
}

pub struct FakeWeather(pub Result<ForecastReading, ()>);

impl ForecastSource for FakeWeather {
    async fn tomorrow(&self) -> Result<ForecastReading, WeatherError> {
        self.0
            .clone()
            .map_err(|_| WeatherError::LocationNotFound("Atlantis".to_string()))
    }
}
