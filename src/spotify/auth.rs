use std::{net::SocketAddr, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::Mutex,
};

use crate::{
    config::Config,
    error::{AuthError, ConfigError},
    info,
    management::TokenStore,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long `moodify auth` waits for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Everything needed to talk to the Spotify accounts service.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    http: Client,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    scope: String,
    auth_url: Url,
    token_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl SpotifyAuth {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client_id = config.require_client_id()?.to_string();
        let auth_url =
            Url::parse(&config.spotify.auth_url).map_err(|e| ConfigError::Invalid {
                key: "SPOTIFY_API_AUTH_URL",
                value: config.spotify.auth_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http: Client::new(),
            client_id,
            client_secret: config.spotify.client_secret.clone(),
            redirect_uri: config.spotify.redirect_uri.clone(),
            scope: normalize_scope(&config.spotify.scope),
            auth_url,
            token_url: config.spotify.token_url.clone(),
        })
    }

    /// The URL a user visits to grant access, carrying the PKCE challenge.
    pub fn authorize_url(&self, code_challenge: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", self.client_id.as_str())
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", self.redirect_uri.as_str())
            .append_pair("code_challenge_method", "S256")
            .append_pair("code_challenge", code_challenge)
            .append_pair("scope", &self.scope);
        url.to_string()
    }

    /// Exchanges an authorization code for a fresh token.
    pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<Token, AuthError> {
        let res = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        let refresh_token = res.refresh_token.clone().ok_or_else(|| {
            AuthError::Malformed("authorization response carried no refresh token".to_string())
        })?;

        Ok(into_token(res, refresh_token))
    }

    /// Trades the refresh token for a new access token.
    ///
    /// Returns a new value; `token` is left untouched and nothing is written
    /// to disk. Spotify does not always rotate the refresh token, so the old
    /// one is carried over when the response omits it.
    pub async fn refresh(&self, token: &Token) -> Result<Token, AuthError> {
        let res = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
            ])
            .await?;

        let refresh_token = res
            .refresh_token
            .clone()
            .unwrap_or_else(|| token.refresh_token.clone());

        Ok(into_token(res, refresh_token))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let mut request = self.http.post(&self.token_url).form(form);
        if let Some(secret) = &self.client_secret {
            request = request.basic_auth(&self.client_id, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))
    }
}

fn into_token(res: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token,
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Scopes must be space separated; commas are accepted for convenience.
pub fn normalize_scope(scope: &str) -> String {
    scope
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared between the auth flow and the callback handler.
pub struct CallbackState {
    pub auth: SpotifyAuth,
    pub pkce: Mutex<Option<PkceToken>>,
}

/// Runs the browser based OAuth 2.0 PKCE flow and stores the token.
///
/// 1. Generates a PKCE verifier and challenge
/// 2. Starts the local callback server on `server_addr`
/// 3. Opens the authorization URL (or prints it if no browser is available)
/// 4. Waits for the callback to exchange the code
/// 5. Persists the token to `store`
pub async fn authorize(
    auth: SpotifyAuth,
    server_addr: SocketAddr,
    store: &TokenStore,
) -> Result<Token, AuthError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let auth_url = auth.authorize_url(&code_challenge);

    let state = Arc::new(CallbackState {
        auth,
        pkce: Mutex::new(Some(PkceToken {
            code_verifier,
            token: None,
        })),
    });

    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Spotify to redirect to {}", server_addr);
    }

    let token = wait_for_token(&state).await.ok_or_else(|| {
        AuthError::Malformed("authentication failed or timed out".to_string())
    })?;

    store.persist(&token).await?;
    success!("Authentication successful!");
    Ok(token)
}

/// Prints the authorization URL and reads the redirect back from stdin.
///
/// For hosts where the callback server cannot be reached. Accepts either the
/// full redirect URL or just the `code` value.
pub async fn authorize_manual(auth: SpotifyAuth, store: &TokenStore) -> Result<Token, AuthError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    info!(
        "Open this URL, approve access, then paste the URL you were redirected to:\n{}",
        auth.authorize_url(&code_challenge)
    );

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| AuthError::Malformed(e.to_string()))?;

    let code = utils::extract_auth_code(&line)
        .ok_or_else(|| AuthError::Malformed("no authorization code in input".to_string()))?;

    let token = auth.exchange_code(&code, &code_verifier).await?;
    store.persist(&token).await?;
    success!("Authentication successful!");
    Ok(token)
}

/// Polls the shared state once a second until the callback delivered a token.
async fn wait_for_token(state: &CallbackState) -> Option<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        {
            let lock = state.pkce.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
