use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{error::AuthError, types::Token};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// The flat JSON token file.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Token, AuthError> {
        let content =
            async_fs::read_to_string(&self.path)
                .await
                .map_err(|e| AuthError::MissingToken {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;

        serde_json::from_str(&content).map_err(|e| AuthError::MissingToken {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn persist(&self, token: &Token) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(token).map_err(|e| AuthError::Storage(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }
}

/// True once the token is within the expiry margin.
pub fn is_expired(token: &Token) -> bool {
    is_expired_at(token, Utc::now().timestamp() as u64)
}

pub fn is_expired_at(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}

/// A token that only carries a refresh token and must be refreshed before use.
pub fn from_refresh_token(refresh_token: &str) -> Token {
    Token {
        access_token: String::new(),
        refresh_token: refresh_token.to_string(),
        scope: String::new(),
        expires_in: 0,
        obtained_at: 0,
    }
}
