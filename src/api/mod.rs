//! # API Module
//!
//! Endpoints served by the short-lived local web server that `moodify auth`
//! starts while the user approves access in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback`, the OAuth redirect target. Exchanges the
//!   `code` query parameter for a token using the PKCE verifier held in the
//!   shared [`CallbackState`](crate::spotify::auth::CallbackState) and stores
//!   the result there for the waiting auth flow to pick up.
//! - [`health`] - `GET /health`, reports the crate version and whether a token
//!   has been received yet.
//!
//! Both handlers get the shared state through an axum `Extension` layer; see
//! [`crate::server::router`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
