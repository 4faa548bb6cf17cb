//! Configuration management for moodify.
//!
//! Settings come from environment variables and `.env` files and are read
//! exactly once into a typed [`Config`], which is then passed down to every
//! component. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`moodify/.env`)
//! 4. Application defaults (where applicable)

use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use chrono::NaiveTime;

use crate::error::ConfigError;

pub const DEFAULT_TRACK_COUNT: usize = 12;
pub const DEFAULT_CITY: &str = "Dublin,IE";
pub const DEFAULT_MARKET: &str = "IE";
pub const DEFAULT_RUN_TIME: &str = "07:00";
pub const DEFAULT_SCOPE: &str =
    "playlist-modify-public playlist-modify-private playlist-read-collaborative";

pub const MODE_MANUAL: &str = "manual";
pub const MODE_SCHEDULER: &str = "scheduler";

const PREFIX_MANUAL: &str = "playlist_moodify";
const PREFIX_SCHEDULER: &str = "playlist_moodify_scheduler";

/// Loads `.env` files into the process environment.
///
/// Variables that are already set are never overwritten, so the shell
/// environment wins over the working directory file, which wins over the
/// file in the local data directory:
/// - Linux: `~/.local/share/moodify/.env`
/// - macOS: `~/Library/Application Support/moodify/.env`
/// - Windows: `%LOCALAPPDATA%/moodify/.env`
///
/// Missing files are not an error.
pub async fn load_env() -> std::io::Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    dotenv::dotenv().ok();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    Ok(())
}

/// Platform data directory for moodify (token cache, `.env`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodify");
    path
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub city: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub market: String,
    /// Overrides the token file when set, for headless hosts.
    pub refresh_token: Option<String>,
    pub token_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub weather: WeatherConfig,
    pub spotify: SpotifyConfig,
    pub playlist_id: Option<String>,
    pub server_addr: SocketAddr,
    pub track_count: usize,
    pub dry_run: bool,
    pub summary_prefix: Option<String>,
    pub summary_dir: PathBuf,
    pub mode: String,
    pub timezone: Option<String>,
    pub run_time: NaiveTime,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let weather = WeatherConfig {
            api_key: get("OW_API_KEY"),
            city: or("OW_CITY", DEFAULT_CITY),
            api_url: or("OW_API_URL", "https://api.openweathermap.org"),
        };

        let token_file = get("SPOTIFY_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("cache/token.json"));

        let spotify = SpotifyConfig {
            client_id: get("SPOTIFY_CLIENT_ID"),
            client_secret: get("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: or("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
            scope: or("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            api_url: or("SPOTIFY_API_URL", "https://api.spotify.com/v1"),
            auth_url: or(
                "SPOTIFY_API_AUTH_URL",
                "https://accounts.spotify.com/authorize",
            ),
            token_url: or(
                "SPOTIFY_API_TOKEN_URL",
                "https://accounts.spotify.com/api/token",
            ),
            market: or("SPOTIFY_MARKET", DEFAULT_MARKET),
            refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
            token_file,
        };

        let server_raw = or("SERVER_ADDRESS", "127.0.0.1:8888");
        let server_addr = server_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "SERVER_ADDRESS",
                value: server_raw.clone(),
                reason: e.to_string(),
            })?;

        let track_count = match get("TRACK_COUNT") {
            Some(raw) => parse_track_count(&raw)?,
            None => DEFAULT_TRACK_COUNT,
        };

        let dry_run = match get("DRY_RUN") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "DRY_RUN",
                value: raw.clone(),
                reason: "expected true or false".to_string(),
            })?,
            None => false,
        };

        let run_raw = or("RUN_TIME", DEFAULT_RUN_TIME);
        let run_time = parse_run_time(&run_raw).ok_or_else(|| ConfigError::Invalid {
            key: "RUN_TIME",
            value: run_raw.clone(),
            reason: "must be in 'HH:MM' 24h format, e.g. 07:00".to_string(),
        })?;

        Ok(Self {
            weather,
            spotify,
            playlist_id: get("PLAYLIST_ID"),
            server_addr,
            track_count,
            dry_run,
            summary_prefix: get("SUMMARY_PREFIX"),
            summary_dir: get("SUMMARY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            mode: or("MOODIFY_MODE", MODE_MANUAL),
            timezone: get("TZ"),
            run_time,
        })
    }

    /// File name prefix for the run summary.
    ///
    /// An explicit `SUMMARY_PREFIX` wins; otherwise the run mode decides.
    pub fn summary_prefix(&self) -> String {
        match &self.summary_prefix {
            Some(prefix) => prefix.clone(),
            None if self.mode == MODE_SCHEDULER => PREFIX_SCHEDULER.to_string(),
            None => PREFIX_MANUAL.to_string(),
        }
    }

    pub fn require_playlist_id(&self) -> Result<&str, ConfigError> {
        self.playlist_id
            .as_deref()
            .ok_or(ConfigError::Missing("PLAYLIST_ID"))
    }

    /// The configured `TZ` if it does not resolve to a zone.
    ///
    /// Time arithmetic then silently falls back to the system timezone, so
    /// callers warn about it.
    pub fn unresolved_timezone(&self) -> Option<&str> {
        if cfg!(not(unix)) {
            return None;
        }
        self.timezone
            .as_deref()
            .filter(|tz| !timezone_resolves(tz, &zoneinfo_dirs()))
    }

    pub fn require_weather_key(&self) -> Result<&str, ConfigError> {
        self.weather
            .api_key
            .as_deref()
            .ok_or(ConfigError::Missing("OW_API_KEY"))
    }

    pub fn require_client_id(&self) -> Result<&str, ConfigError> {
        self.spotify
            .client_id
            .as_deref()
            .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))
    }
}

/// Unparsable counts fall back to the default; zero is rejected.
/// Where the C library and chrono look for IANA zone files.
fn zoneinfo_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = env::var_os("TZDIR").map(PathBuf::from).into_iter().collect();
    dirs.extend(
        ["/usr/share/zoneinfo", "/usr/lib/zoneinfo", "/usr/share/lib/zoneinfo"]
            .iter()
            .map(PathBuf::from),
    );
    dirs
}

/// Whether `TZ=name` names a timezone the process can load.
///
/// Zone names must exist as files under one of `dirs`. POSIX rule
/// strings such as `CET-1CEST` carry their own offsets and are accepted as
/// is.
pub fn timezone_resolves(name: &str, dirs: &[PathBuf]) -> bool {
    let name = name.trim().trim_start_matches(':');
    if name.is_empty() || matches!(name, "UTC" | "GMT" | "localtime") {
        return true;
    }
    if !name.contains('/') && name.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return path.is_file();
    }
    if name.split('/').any(|part| part == "..") {
        return false;
    }
    dirs.iter().any(|dir| dir.join(path).is_file())
}

fn parse_track_count(raw: &str) -> Result<usize, ConfigError> {
    match raw.parse::<usize>() {
        Ok(0) => Err(ConfigError::Invalid {
            key: "TRACK_COUNT",
            value: raw.to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(_) => {
            log::debug!("TRACK_COUNT {raw:?} is not a number, using {DEFAULT_TRACK_COUNT}");
            Ok(DEFAULT_TRACK_COUNT)
        }
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_run_time(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
