use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{error::SpotifyError, types::Token};

/// Authenticated handle on the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(api_url: &str, market: &str, token: &Token) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            market: market.to_string(),
            access_token: token.access_token.clone(),
        }
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.endpoint(path))
            .bearer_auth(&self.access_token)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .bearer_auth(&self.access_token)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http
            .put(self.endpoint(path))
            .bearer_auth(&self.access_token)
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SpotifyError> {
        let response = checked(request.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SpotifyError::Malformed(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Maps non-2xx responses to [`SpotifyError`].
pub(crate) async fn checked(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(SpotifyError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SpotifyError::Status {
        status: status.as_u16(),
        body,
    })
}
