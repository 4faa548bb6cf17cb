mod common;

use common::{FakeSpotify, Recommendations, pool, reading};
use moodify::{
    config::Config,
    mood::map_mood,
    spotify::{
        auth::{SpotifyAuth, normalize_scope},
        playlist::{PlaylistUpdate, add_tracks, replace_playlist},
        tracks::{recommendation_params, search_params},
    },
    types::{RecommendationsResponse, SearchResponse},
};
use reqwest::Url;

fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> &'a str {
    params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
        .unwrap()
}

#[test]
fn test_recommendation_params() {
    let mood = map_mood(&reading("light rain", 14.0));
    let params = recommendation_params(&mood, 24, "IE");

    assert_eq!(param(&params, "seed_genres"), "lo-fi,acoustic,indie-folk");
    assert_eq!(param(&params, "limit"), "24");
    assert_eq!(param(&params, "market"), "IE");
    assert_eq!(param(&params, "min_energy"), "0.20");
    assert_eq!(param(&params, "max_energy"), "0.40");
    assert_eq!(param(&params, "min_tempo"), "70");
    assert_eq!(param(&params, "max_tempo"), "95");
}

#[test]
fn test_search_params() {
    let params = search_params("indie-folk", 25, 25, "IE");

    assert_eq!(param(&params, "q"), "genre:\"indie-folk\"");
    assert_eq!(param(&params, "type"), "track");
    assert_eq!(param(&params, "offset"), "25");
    assert_eq!(param(&params, "limit"), "25");
}

#[test]
fn test_recommendations_payload_skips_unplayable_items() {
    let body = r#"{
        "tracks": [
            {
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Holocene",
                "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
                "popularity": 71,
                "artists": [
                    { "id": "4LEiUm1SRbFMgfqnQTwUbQ", "name": "Bon Iver" },
                    { "id": "x", "name": "Guest" }
                ]
            },
            { "id": null, "name": "Local file", "uri": "spotify:local:::x:1", "artists": [] },
            { "id": "noartists", "name": "Orphan", "uri": "spotify:track:noartists", "artists": [] }
        ]
    }"#;

    let response: RecommendationsResponse = serde_json::from_str(body).unwrap();
    let tracks: Vec<_> = response
        .tracks
        .into_iter()
        .filter_map(|t| t.into_track())
        .collect();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "Holocene");
    assert_eq!(tracks[0].primary_artist.id, "4LEiUm1SRbFMgfqnQTwUbQ");
    assert_eq!(tracks[0].artist_line(), "Bon Iver, Guest");
    assert_eq!(tracks[0].popularity, 71);
}

#[test]
fn test_search_payload_defaults() {
    let body = r#"{
        "tracks": {
            "href": "https://api.spotify.com/v1/search",
            "items": [
                {
                    "id": "abc",
                    "name": "Untitled",
                    "uri": "spotify:track:abc",
                    "artists": [{ "name": "Nameless Band" }]
                }
            ],
            "total": 1
        }
    }"#;

    let response: SearchResponse = serde_json::from_str(body).unwrap();
    let track = response.tracks.items[0].clone().into_track().unwrap();

    assert_eq!(track.popularity, 0);
    assert_eq!(track.primary_artist.id, "nameless band");
}

#[tokio::test]
async fn test_dry_run_makes_no_calls() {
    let spotify = FakeSpotify::new(Recommendations::Tracks(vec![]), vec![]);
    let batch = pool(5, 1);

    let update = replace_playlist(&spotify, "p", &batch, true).await.unwrap();

    assert_eq!(update, PlaylistUpdate::DryRun { tracks: 5 });
    assert_eq!(spotify.write_count(), 0);
}

#[tokio::test]
async fn test_exactly_one_hundred_is_a_single_put() {
    let spotify = FakeSpotify::new(Recommendations::Tracks(vec![]), vec![]);
    let batch = pool(100, 1);

    replace_playlist(&spotify, "p", &batch, false).await.unwrap();

    let writes = spotify.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "PUT");
    assert_eq!(writes[0].1.len(), 100);
}

#[tokio::test]
async fn test_add_tracks_appends_in_chunks() {
    let spotify = FakeSpotify::new(Recommendations::Tracks(vec![]), vec![]);
    let uris: Vec<String> = pool(150, 1).into_iter().map(|t| t.uri).collect();

    let snapshot = add_tracks(&spotify, "p", &uris).await.unwrap();

    assert_eq!(snapshot, Some("snap-2".to_string()));
    let writes = spotify.writes.lock().unwrap();
    let methods: Vec<_> = writes.iter().map(|(m, _)| *m).collect();
    let sizes: Vec<_> = writes.iter().map(|(_, uris)| uris.len()).collect();
    assert_eq!(methods, vec!["POST", "POST"]);
    assert_eq!(sizes, vec![100, 50]);
    assert_eq!(writes[0].1[0], uris[0]);
    assert_eq!(writes[1].1[49], uris[149]);
}

#[tokio::test]
async fn test_add_no_tracks_sends_nothing() {
    let spotify = FakeSpotify::new(Recommendations::Tracks(vec![]), vec![]);

    let snapshot = add_tracks(&spotify, "p", &[]).await.unwrap();

    assert_eq!(snapshot, None);
    assert_eq!(spotify.write_count(), 0);
}

#[tokio::test]
async fn test_add_tracks_stops_at_first_failure() {
    let mut spotify = FakeSpotify::new(Recommendations::Tracks(vec![]), vec![]);
    spotify.failing_writes = true;
    let uris: Vec<String> = pool(150, 1).into_iter().map(|t| t.uri).collect();

    assert!(add_tracks(&spotify, "p", &uris).await.is_err());
    assert_eq!(spotify.write_count(), 1);
}

#[test]
fn test_normalize_scope() {
    assert_eq!(
        normalize_scope("playlist-modify-public, playlist-modify-private"),
        "playlist-modify-public playlist-modify-private"
    );
    assert_eq!(normalize_scope("  a   b  "), "a b");
}

#[test]
fn test_authorize_url_carries_pkce_challenge() {
    let config = Config::from_lookup(|key| match key {
        "SPOTIFY_CLIENT_ID" => Some("client-123".to_string()),
        "SPOTIFY_SCOPE" => Some("playlist-modify-public,playlist-modify-private".to_string()),
        _ => None,
    })
    .unwrap();
    let auth = SpotifyAuth::from_config(&config).unwrap();

    let url = Url::parse(&auth.authorize_url("challenge-xyz")).unwrap();
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap()
    };

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(get("client_id"), "client-123");
    assert_eq!(get("response_type"), "code");
    assert_eq!(get("code_challenge_method"), "S256");
    assert_eq!(get("code_challenge"), "challenge-xyz");
    assert_eq!(get("redirect_uri"), "http://127.0.0.1:8888/callback");
    assert_eq!(get("scope"), "playlist-modify-public playlist-modify-private");
}

#[test]
fn test_auth_requires_client_id() {
    let config = Config::from_lookup(|_| None).unwrap();
    assert!(SpotifyAuth::from_config(&config).is_err());
}
