//! Error types for moodify.
//!
//! Every failure a run can hit is one of these. Empty search results are not
//! errors; they surface as a skipped playlist update in the run report.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting {0}. Add it to your environment or .env file.")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No stored token at {}. Please run `moodify auth` first. ({reason})", .path.display())]
    MissingToken { path: PathBuf, reason: String },

    #[error("Spotify rejected the token request ({status}): {body}. Please run `moodify auth` again.")]
    Rejected { status: u16, body: String },

    #[error("Token request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Token response could not be read: {0}")]
    Malformed(String),

    #[error("Cannot store token: {0}")]
    Storage(String),
}

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("Spotify access token expired or was revoked. Please run `moodify auth` again.")]
    Unauthorized,

    #[error("Spotify API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Spotify request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected Spotify payload: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("City not found: {0}")]
    LocationNotFound(String),

    #[error("Could not find forecast entries for tomorrow")]
    NoForecastForTomorrow,

    #[error("Unexpected weather payload: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum MoodifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Spotify(#[from] SpotifyError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Cannot write summary {}: {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
