mod common;

use std::path::Path;

use chrono::NaiveDate;
use common::{reading, track};
use moodify::{
    management::{SummaryRecord, format_summary, summary_path, write_summary},
    mood::map_mood,
    selector::{CandidateSource, FallbackCause},
};
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

#[test]
fn test_summary_path() {
    assert_eq!(
        summary_path(Path::new("logs"), "playlist_moodify", date()),
        Path::new("logs/playlist_moodify_2025-03-01.txt")
    );
    assert_eq!(
        summary_path(Path::new("/tmp/x"), "playlist_moodify_scheduler", date()),
        Path::new("/tmp/x/playlist_moodify_scheduler_2025-03-01.txt")
    );
}

#[test]
fn test_format_summary() {
    let forecast = reading("light rain", 14.0);
    let mood = map_mood(&forecast);
    let mut second = track("t2", "b", 20);
    second.title = "Re: Stacks".to_string();
    second.artists = vec!["Bon Iver".to_string(), "Guest".to_string()];
    let tracks = vec![track("t1", "a", 10), second];

    let text = format_summary(&SummaryRecord {
        date: date(),
        city: "Dublin,IE",
        forecast: &forecast,
        mood: &mood,
        source: &CandidateSource::Recommendations,
        tracks: &tracks,
    });

    let expected = "\
Date: 2025-03-01
City: Dublin,IE
Condition: light rain
Temperature: 14.0°C
Mood: rainy
Mood Genres: lo-fi, acoustic, indie-folk
Energy: 0.20-0.40 | Valence: 0.30-0.50 | Tempo: 70-95 BPM
Source: recommendations
Tracks Added: 2

Track List:
01. Song t1 — A
02. Re: Stacks — Bon Iver, Guest
";
    assert_eq!(text, expected);
}

#[test]
fn test_format_summary_without_tracks() {
    let forecast = reading("clear sky", 25.0);
    let mood = map_mood(&forecast);
    let source = CandidateSource::SearchFallback {
        cause: FallbackCause::Empty,
    };

    let text = format_summary(&SummaryRecord {
        date: date(),
        city: "Lisbon,PT",
        forecast: &forecast,
        mood: &mood,
        source: &source,
        tracks: &[],
    });

    assert!(text.contains("Source: genre search (recommendations returned no tracks)"));
    assert!(text.contains("Tracks Added: 0"));
    assert!(text.ends_with("Track List:\n(no tracks found)\n"));
}

#[tokio::test]
async fn test_write_summary_creates_dir_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("logs");
    let forecast = reading("mist", 8.0);
    let mood = map_mood(&forecast);
    let tracks = vec![track("t1", "a", 10)];

    let record = SummaryRecord {
        date: date(),
        city: "Dublin,IE",
        forecast: &forecast,
        mood: &mood,
        source: &CandidateSource::Recommendations,
        tracks: &tracks,
    };

    let path = write_summary(&out, "playlist_moodify", &record).await.unwrap();
    assert_eq!(path, out.join("playlist_moodify_2025-03-01.txt"));

    let empty = SummaryRecord { tracks: &[], ..record };
    let again = write_summary(&out, "playlist_moodify", &empty).await.unwrap();
    assert_eq!(again, path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Tracks Added: 0"));
    assert!(!text.contains("Song t1"));
}
