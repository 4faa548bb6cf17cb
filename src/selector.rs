//! Track selection.
//!
//! Candidates come from the recommendations endpoint first. When that call
//! fails or comes back empty, one genre search per seed genre is run
//! instead, each starting at a random page offset so repeated runs with the
//! same mood do not return the same page. The candidate pool is then ranked
//! by popularity, reduced to one track per primary artist, shuffled and cut
//! to the requested size.
//!
//! An empty batch is not an error; the runner reports it as "no tracks
//! found". Selection fails only when the fallback was needed and every genre
//! search failed, since an empty pool then says nothing about the mood.

use std::{collections::HashSet, fmt};

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::SpotifyError,
    spotify::TrackCatalog,
    types::{MoodDescriptor, Track, TrackBatch},
    warning,
};

/// Page size for each genre search.
pub const SEARCH_PAGE_SIZE: u32 = 25;
/// Upper bound (inclusive) of the random search offset.
pub const MAX_SEARCH_OFFSET: u32 = 50;

/// Why the recommendations attempt was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackCause {
    Failed(String),
    Empty,
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackCause::Failed(reason) => write!(f, "recommendations failed: {reason}"),
            FallbackCause::Empty => write!(f, "recommendations returned no tracks"),
        }
    }
}

/// Which of the two attempts produced the candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    Recommendations,
    SearchFallback { cause: FallbackCause },
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Recommendations => write!(f, "recommendations"),
            CandidateSource::SearchFallback { cause } => write!(f, "genre search ({cause})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub batch: TrackBatch,
    pub source: CandidateSource,
}

/// Decides whether a recommendations result is usable.
pub fn recommendation_outcome(
    result: Result<Vec<Track>, SpotifyError>,
) -> Result<Vec<Track>, FallbackCause> {
    match result {
        Ok(tracks) if tracks.is_empty() => Err(FallbackCause::Empty),
        Ok(tracks) => Ok(tracks),
        Err(e) => Err(FallbackCause::Failed(e.to_string())),
    }
}

/// How many recommendations to ask for: twice the batch, within 10..=100.
pub fn recommendation_limit(count: usize) -> u32 {
    (count.saturating_mul(2)).clamp(10, 100) as u32
}

/// Sorts by popularity, keeps one track per primary artist, shuffles and
/// truncates to `count`.
///
/// The sort is stable, so among equally popular tracks by the same artist the
/// one seen first in `candidates` survives.
pub fn rank_candidates<R: Rng + ?Sized>(
    mut candidates: Vec<Track>,
    count: usize,
    rng: &mut R,
) -> TrackBatch {
    candidates.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    let mut seen_artists = HashSet::new();
    candidates.retain(|t| seen_artists.insert(t.primary_artist.id.clone()));

    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// Runs one genre search per seed, skipping failed searches.
///
/// Returns the last error if no search succeeded.
async fn search_fallback<C: TrackCatalog, R: Rng + ?Sized>(
    catalog: &C,
    seeds: &[String],
    rng: &mut R,
) -> Result<Vec<Track>, SpotifyError> {
    let offsets: Vec<u32> = seeds
        .iter()
        .map(|_| rng.random_range(0..=MAX_SEARCH_OFFSET))
        .collect();

    let mut collected = Vec::new();
    let mut succeeded = seeds.is_empty();
    let mut last_error = None;
    for (genre, offset) in seeds.iter().zip(offsets) {
        match catalog.search_genre(genre, offset, SEARCH_PAGE_SIZE).await {
            Ok(tracks) => {
                log::debug!("search {genre:?} @{offset}: {} tracks", tracks.len());
                succeeded = true;
                collected.extend(tracks);
            }
            Err(e) => {
                warning!("Search for genre {} failed: {}", genre, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !succeeded => Err(e),
        _ => Ok(collected),
    }
}

/// Picks up to `count` tracks for the mood.
pub async fn select_tracks<C: TrackCatalog, R: Rng + ?Sized>(
    catalog: &C,
    mood: &MoodDescriptor,
    count: usize,
    rng: &mut R,
) -> Result<Selection, SpotifyError> {
    let attempt = catalog
        .recommendations(mood, recommendation_limit(count))
        .await;

    let (candidates, source) = match recommendation_outcome(attempt) {
        Ok(tracks) => (tracks, CandidateSource::Recommendations),
        Err(cause) => {
            log::debug!("falling back to genre search: {cause}");
            let tracks = search_fallback(catalog, &mood.seed_genres, rng).await?;
            (tracks, CandidateSource::SearchFallback { cause })
        }
    };

    Ok(Selection {
        batch: rank_candidates(candidates, count, rng),
        source,
    })
}
