//! # CLI Module
//!
//! User-facing commands. Each one takes the loaded [`Config`](crate::config::Config),
//! delegates to the library modules and reports through the colored output
//! macros. Fatal problems end in `error!`, which exits with
//! status 1.
//!
//! ## Commands
//!
//! - [`auth`] - one-time Spotify authorization (browser callback or `--manual`
//!   code paste), stores the token file
//! - [`run`] - one pass: tomorrow's forecast, mood, tracks, playlist replacement
//!   and summary file
//! - [`schedule`] - runs [`run`] every day at `RUN_TIME` until interrupted
//! - [`forecast`] - prints tomorrow's forecast and the mood it maps to,
//!   without touching Spotify
//! - [`create_playlist`] - creates the target playlist and prints its ID
//! - [`add_tracks`] - appends individual tracks to a playlist without
//!   replacing its contents
//!
//! ## Typical setup
//!
//! ```bash
//! moodify auth
//! moodify playlist create "Tomorrow's Weather"   # copy the ID into PLAYLIST_ID
//! moodify forecast
//! moodify run --dry-run
//! moodify schedule
//! ```

mod auth;
mod forecast;
mod playlist;
mod run;
mod schedule;

pub use auth::auth;
pub use forecast::forecast;
pub use playlist::{add_tracks, create_playlist};
pub use run::run;
pub use schedule::schedule;
