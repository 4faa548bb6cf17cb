//! # Spotify Integration Module
//!
//! The layer between moodify and the Spotify Web API. It owns every HTTP
//! call made to Spotify and hands typed values back to the pipeline.
//!
//! ```text
//! Runner / CLI
//!      ↓
//! Spotify Integration Layer
//!     ├── auth      (OAuth 2.0 PKCE, explicit token refresh)
//!     ├── client    (authenticated client value, status mapping)
//!     ├── tracks    (recommendations, genre search)
//!     └── playlist  (full replace, create)
//!      ↓
//! reqwest / JSON
//! ```
//!
//! ## Client values instead of globals
//!
//! A [`SpotifyClient`] is built once per run from a [`crate::types::Token`]
//! and passed by reference to whatever needs it. Refreshing a token never
//! happens behind the caller's back: [`auth::SpotifyAuth::refresh`] returns a
//! new token and the caller decides whether to persist it.
//!
//! ## Seams
//!
//! The pipeline talks to Spotify through two traits, [`TrackCatalog`] and
//! [`PlaylistService`]. [`SpotifyClient`] implements both; the integration
//! tests use in-memory fakes.
//!
//! ## Endpoints
//!
//! - `GET /recommendations` - seed genres plus min/max energy, valence, tempo
//! - `GET /search` - `genre:"<seed>"` track search with a page offset
//! - `PUT /playlists/{id}/tracks` - replace all playlist items
//! - `POST /playlists/{id}/tracks` - append items past the first 100
//! - `POST /me/playlists` - create the target playlist
//! - `POST /api/token` - code exchange and refresh

pub mod auth;
pub mod client;
pub mod playlist;
pub mod tracks;

pub use client::SpotifyClient;

use crate::{
    error::SpotifyError,
    types::{MoodDescriptor, Track},
};

/// Read side of the music service: where candidate tracks come from.
#[allow(async_fn_in_trait)]
pub trait TrackCatalog {
    /// Tracks recommended for the mood's seed genres within its feature ranges.
    async fn recommendations(
        &self,
        mood: &MoodDescriptor,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError>;

    /// One page of tracks tagged with `genre`, starting at `offset`.
    async fn search_genre(
        &self,
        genre: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError>;
}

/// Write side of the music service.
#[allow(async_fn_in_trait)]
pub trait PlaylistService {
    /// Replaces every item in the playlist with `uris`, in order.
    async fn replace_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError>;

    /// Appends `uris` to the end of the playlist.
    async fn append_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError>;
}
