use crate::{
    config::Config,
    error, info, runner,
    spotify::{SpotifyClient, auth::SpotifyAuth, playlist},
    success, utils,
};

async fn client(config: &Config) -> SpotifyClient {
    let spotify_auth = match SpotifyAuth::from_config(config) {
        Ok(spotify_auth) => spotify_auth,
        Err(e) => error!("{}", e),
    };
    let token = match runner::credentials(config, &spotify_auth).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };
    SpotifyClient::new(&config.spotify.api_url, &config.spotify.market, &token)
}

pub async fn create_playlist(config: &Config, name: &str, public: bool, description: &str) {
    let client = client(config).await;

    match playlist::create(&client, name, public, description).await {
        Ok(created) => {
            success!("Playlist '{}' created.", created.name);
            info!("Add this to your .env:\nPLAYLIST_ID={}", created.id);
        }
        Err(e) => error!("Failed to create playlist: {}", e),
    }
}

pub async fn add_tracks(config: &Config, playlist_id: Option<&str>, tracks: &[String]) {
    let playlist_id = match playlist_id {
        Some(id) => id.to_string(),
        None => match config.require_playlist_id() {
            Ok(id) => id.to_string(),
            Err(e) => error!("{}", e),
        },
    };

    let mut uris = Vec::with_capacity(tracks.len());
    for track in tracks {
        match utils::track_uri(track) {
            Some(uri) => uris.push(uri),
            None => error!("'{}' is not a Spotify track id, URI or link.", track),
        }
    }

    let client = client(config).await;
    match playlist::add_tracks(&client, &playlist_id, &uris).await {
        Ok(snapshot) => {
            success!("Added {} tracks to playlist {}.", uris.len(), playlist_id);
            if let Some(snapshot) = snapshot {
                log::debug!("playlist snapshot {snapshot}");
            }
        }
        Err(e) => error!("Failed to add tracks: {}", e),
    }
}
