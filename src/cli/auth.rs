use crate::{
    config::Config,
    error,
    management::TokenStore,
    spotify::auth::{self, SpotifyAuth},
    success,
};

pub async fn auth(config: &Config, manual: bool) {
    let spotify_auth = match SpotifyAuth::from_config(config) {
        Ok(spotify_auth) => spotify_auth,
        Err(e) => error!("{}", e),
    };
    let store = TokenStore::new(&config.spotify.token_file);

    let result = if manual {
        auth::authorize_manual(spotify_auth, &store).await
    } else {
        auth::authorize(spotify_auth, config.server_addr, &store).await
    };

    match result {
        Ok(_) => success!("Token saved to {}", store.path().display()),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
