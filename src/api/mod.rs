//! # API Module
//!
//! HTTP endpoints of the short-lived local server started by `splibcli auth`.
//!
//! - [`callback`] - receives the authorization code from Spotify and
//!   exchanges it, together with the PKCE verifier held in shared state, for
//!   an access token.
//! - [`health`] - reports status and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use splibcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
