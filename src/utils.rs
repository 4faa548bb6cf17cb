use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};
use tabled::Table;

use crate::types::{Track, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Pulls the authorization code out of what the user pasted.
///
/// Accepts the full redirect URL (`...?code=XYZ&state=...`), a bare query
/// string, or the code on its own.
pub fn extract_auth_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if !input.contains("code=") {
        return (!input.contains(['?', '&', '=', ' ', '/'])).then(|| input.to_string());
    }

    let query = input.split_once('?').map_or(input, |(_, q)| q);
    let url = Url::parse(&format!("http://localhost/?{query}")).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

/// Normalizes a track reference to a `spotify:track:` URI.
///
/// Accepts a bare base62 id, a `spotify:track:ID` URI, or an
/// `https://open.spotify.com/track/ID` link (query string and locale prefix
/// ignored).
pub fn track_uri(input: &str) -> Option<String> {
    let input = input.trim();
    let is_id = |id: &str| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric());

    let id = if let Some(id) = input.strip_prefix("spotify:track:") {
        id.to_string()
    } else if input.contains("open.spotify.com") {
        let url = Url::parse(input).ok()?;
        let mut segments = url.path_segments()?;
        segments.find(|s| *s == "track")?;
        segments.next()?.to_string()
    } else {
        input.to_string()
    };

    is_id(&id).then(|| format!("spotify:track:{id}"))
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            position: format!("{:02}", i + 1),
            title: track.title.clone(),
            artists: track.artist_line(),
            popularity: track.popularity,
        })
        .collect()
}

pub fn print_tracks(tracks: &[Track]) {
    let table = Table::new(track_rows(tracks));
    println!("{}", table);
}
