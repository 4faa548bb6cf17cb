use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{api, spotify::auth::CallbackState};

pub fn router(state: Arc<CallbackState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
}

/// Serves the OAuth callback until the process exits.
pub async fn start_api_server(addr: SocketAddr, state: Arc<CallbackState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::debug!("callback server listening on {addr}");
    axum::serve(listener, router(state)).await
}
