use std::collections::HashSet;

/// Seed genres accepted by the recommendations and genre search queries.
pub const SEED_GENRES: &[&str] = &[
    "acoustic",
    "alt-rock",
    "alternative",
    "ambient",
    "blues",
    "chill",
    "classical",
    "dance",
    "dark-pop",
    "deep-house",
    "downtempo",
    "edm",
    "electronic",
    "folk",
    "funk",
    "hip-hop",
    "house",
    "indie",
    "indie-folk",
    "indie-pop",
    "indie-rock",
    "jazz",
    "lo-fi",
    "piano",
    "pop",
    "r-n-b",
    "rainy-day",
    "rock",
    "singer-songwriter",
    "sleep",
    "soul",
    "study",
    "summer",
    "synth-pop",
    "trip-hop",
    "tropical-house",
];

/// Names that are common but not part of the seed vocabulary.
const GENRE_ALIASES: &[(&str, &str)] = &[
    ("alt-pop", "alternative"),
    ("electropop", "electronic"),
    ("chillhop", "chill"),
    ("neo-classical", "classical"),
    ("modern-rock", "rock"),
];

/// Used when nothing in a genre list survives sanitizing.
pub const FALLBACK_SEEDS: &[&str] = &["indie-pop", "alternative", "pop"];

/// Spotify accepts at most five seeds per recommendations request.
pub const MAX_SEEDS: usize = 5;

pub fn is_seed_genre(genre: &str) -> bool {
    SEED_GENRES.contains(&genre)
}

fn resolve_alias(genre: &str) -> &str {
    GENRE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == genre)
        .map(|(_, target)| *target)
        .unwrap_or(genre)
}

/// Maps a genre list onto the seed vocabulary.
///
/// Aliases are resolved, unknown genres dropped, duplicates removed and the
/// list capped at [`MAX_SEEDS`]. Never returns an empty list.
pub fn sanitize_seed_genres<S: AsRef<str>>(genres: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = genres
        .iter()
        .map(|g| g.as_ref().trim().to_lowercase())
        .map(|g| resolve_alias(&g).to_string())
        .filter(|g| is_seed_genre(g))
        .filter(|g| seen.insert(g.clone()))
        .take(MAX_SEEDS)
        .collect();

    if out.is_empty() {
        out = FALLBACK_SEEDS.iter().map(|g| g.to_string()).collect();
    }

    out
}
