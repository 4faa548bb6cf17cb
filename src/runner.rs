//! One pass of the pipeline: forecast → mood → tracks → playlist → summary.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::{
    config::Config,
    error::{ConfigError, MoodifyError},
    info,
    management::{self, SummaryRecord, TokenStore},
    mood,
    selector::{self, Selection},
    spotify::{
        PlaylistService, SpotifyClient, TrackCatalog,
        auth::SpotifyAuth,
        playlist::{self, PlaylistUpdate},
    },
    success,
    types::{ForecastReading, MoodDescriptor, Token},
    utils, warning,
    weather::{ForecastSource, WeatherClient},
};

/// Settings for one run, validated from [`Config`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub playlist_id: String,
    pub city: String,
    pub track_count: usize,
    pub dry_run: bool,
    pub summary_dir: PathBuf,
    pub summary_prefix: String,
    pub date: NaiveDate,
}

impl RunOptions {
    pub fn from_config(config: &Config, date: NaiveDate) -> Result<Self, ConfigError> {
        Ok(Self {
            playlist_id: config.require_playlist_id()?.to_string(),
            city: config.weather.city.clone(),
            track_count: config.track_count,
            dry_run: config.dry_run,
            summary_dir: config.summary_dir.clone(),
            summary_prefix: config.summary_prefix(),
            date,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub forecast: ForecastReading,
    pub mood: MoodDescriptor,
    pub selection: Selection,
    pub summary_path: PathBuf,
    /// `None` when no tracks were found and the playlist was left alone.
    pub playlist: Option<PlaylistUpdate>,
}

/// Runs the pipeline against the given services.
pub async fn run_once<W, S, R>(
    weather: &W,
    spotify: &S,
    options: &RunOptions,
    rng: &mut R,
) -> Result<RunReport, MoodifyError>
where
    W: ForecastSource,
    S: TrackCatalog + PlaylistService,
    R: Rng + ?Sized,
{
    let forecast = weather.tomorrow().await?;
    let mood = mood::map_mood(&forecast);
    info!(
        "[{}] Tomorrow: {} | {:.1}°C | mood: {} ({})",
        options.city,
        forecast.description,
        forecast.temperature_celsius,
        mood.label,
        mood.seed_genres.join(", ")
    );

    let selection = selector::select_tracks(spotify, &mood, options.track_count, rng).await?;
    info!("Tracks from {}", selection.source);

    // No summary unless the playlist write went through.
    let playlist = if selection.batch.is_empty() {
        warning!("No tracks found for the current mood/settings. Playlist left unchanged.");
        None
    } else {
        let update = playlist::replace_playlist(
            spotify,
            &options.playlist_id,
            &selection.batch,
            options.dry_run,
        )
        .await?;

        match &update {
            PlaylistUpdate::DryRun { tracks } => {
                info!("[DRY RUN] Would replace playlist with {} tracks.", tracks)
            }
            PlaylistUpdate::Replaced { tracks, .. } => {
                success!("Playlist replaced with {} tracks.", tracks)
            }
        }
        Some(update)
    };

    let summary_path = management::write_summary(
        &options.summary_dir,
        &options.summary_prefix,
        &SummaryRecord {
            date: options.date,
            city: &options.city,
            forecast: &forecast,
            mood: &mood,
            source: &selection.source,
            tracks: &selection.batch,
        },
    )
    .await?;
    info!("Summary saved to {}", summary_path.display());

    Ok(RunReport {
        forecast,
        mood,
        selection,
        summary_path,
        playlist,
    })
}

/// Loads the stored credentials and refreshes them if they are stale.
///
/// The refreshed token is written back only when it came from the token file.
pub async fn credentials(config: &Config, auth: &SpotifyAuth) -> Result<Token, MoodifyError> {
    let store = TokenStore::new(&config.spotify.token_file);

    let (token, from_file) = match &config.spotify.refresh_token {
        Some(refresh) => (management::from_refresh_token(refresh), false),
        None => (store.load().await?, true),
    };

    if !management::is_expired(&token) {
        return Ok(token);
    }

    let fresh = auth.refresh(&token).await?;
    if from_file {
        store.persist(&fresh).await?;
    }
    log::debug!("access token refreshed");

    Ok(fresh)
}

/// Builds the real clients from `config` and runs the pipeline once.
pub async fn run(config: &Config) -> Result<RunReport, MoodifyError> {
    let today = Local::now().date_naive();
    let options = RunOptions::from_config(config, today)?;
    let weather = WeatherClient::new(&config.weather, config.require_weather_key()?);
    let auth = SpotifyAuth::from_config(config)?;

    let token = credentials(config, &auth).await?;
    let spotify = SpotifyClient::new(&config.spotify.api_url, &config.spotify.market, &token);

    let report = run_once(&weather, &spotify, &options, &mut rand::rng()).await?;

    if !report.selection.batch.is_empty() {
        utils::print_tracks(&report.selection.batch);
    }

    Ok(report)
}
