use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    error::MoodifyError,
    selector::CandidateSource,
    types::{ForecastReading, MoodDescriptor, Track},
};

/// Everything that goes into one run's summary file.
pub struct SummaryRecord<'a> {
    pub date: NaiveDate,
    pub city: &'a str,
    pub forecast: &'a ForecastReading,
    pub mood: &'a MoodDescriptor,
    pub source: &'a CandidateSource,
    pub tracks: &'a [Track],
}

/// `<dir>/<prefix>_<YYYY-MM-DD>.txt`
pub fn summary_path(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{prefix}_{}.txt", date.format("%Y-%m-%d")))
}

/// Renders the summary text. Same record, same bytes.
pub fn format_summary(record: &SummaryRecord<'_>) -> String {
    let mood = record.mood;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Date: {}", record.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "City: {}", record.city);
    let _ = writeln!(out, "Condition: {}", record.forecast.description);
    let _ = writeln!(
        out,
        "Temperature: {:.1}°C",
        record.forecast.temperature_celsius
    );
    let _ = writeln!(out, "Mood: {}", mood.label);
    let _ = writeln!(out, "Mood Genres: {}", mood.seed_genres.join(", "));
    let _ = writeln!(
        out,
        "Energy: {:.2}-{:.2} | Valence: {:.2}-{:.2} | Tempo: {:.0}-{:.0} BPM",
        mood.energy.min,
        mood.energy.max,
        mood.valence.min,
        mood.valence.max,
        mood.tempo.min,
        mood.tempo.max
    );
    let _ = writeln!(out, "Source: {}", record.source);
    let _ = writeln!(out, "Tracks Added: {}", record.tracks.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "Track List:");

    if record.tracks.is_empty() {
        let _ = writeln!(out, "(no tracks found)");
    }

    for (i, track) in record.tracks.iter().enumerate() {
        let _ = writeln!(out, "{:02}. {} — {}", i + 1, track.title, track.artist_line());
    }

    out
}

/// Writes the summary, replacing any file from an earlier run on that date.
pub async fn write_summary(
    dir: &Path,
    prefix: &str,
    record: &SummaryRecord<'_>,
) -> Result<PathBuf, MoodifyError> {
    let path = summary_path(dir, prefix, record.date);
    let io_err = |source: std::io::Error| MoodifyError::Summary {
        path: path.clone(),
        source,
    };

    async_fs::create_dir_all(dir).await.map_err(io_err)?;
    async_fs::write(&path, format_summary(record))
        .await
        .map_err(io_err)?;

    Ok(path)
}
