use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::spotify::auth::CallbackState;

pub async fn health(Extension(state): Extension<Arc<CallbackState>>) -> Json<Value> {
    let authorized = state
        .pkce
        .lock()
        .await
        .as_ref()
        .is_some_and(|p| p.token.is_some());

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authorized": authorized
    }))
}
