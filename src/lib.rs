//! Yahoo Fantasy Sports gateway and client library
//!
//! Signs a browser in with Yahoo's OAuth2 code flow, keeps the token in a
//! cookie, forwards Fantasy API reads on the user's behalf, and decodes the
//! API's index-keyed JSON into plain Rust types.
//!
//! ## Features
//!
//! - **OAuth lifecycle**: start, CSRF-checked callback and refresh behind `/api/auth`
//! - **Forwarding gateway**: `/api/yahoo?path=fantasy/...` with the caller's token
//! - **Decoders**: leagues (with the user's team) and rosters from Yahoo's
//!   `{"0": .., "1": .., "count": n}` objects
//! - **CLI**: list leagues and rosters, inspect and refresh tokens
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use yahoo_fantasy::parse_roster_from_response;
//!
//! let response = json!({
//!     "fantasy_content": { "team": [[], { "roster": { "0": { "players": {
//!         "0": { "player": [[
//!             { "player_key": "428.p.1" },
//!             { "name": { "full": "Jane Doe" } }
//!         ]] },
//!         "count": 1
//!     } } } }] }
//! });
//!
//! let players = parse_roster_from_response(&response);
//! assert_eq!(players[0].name, "Jane Doe");
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export YAHOO_CLIENT_ID=...
//! export YAHOO_CLIENT_SECRET=...
//! export YAHOO_REDIRECT_URI=https://fantasy.example.com/api/auth  # optional
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod oauth;
pub mod server;
pub mod yahoo;

// Re-export commonly used types
pub use cli::types::TeamKey;
pub use error::{Result, YahooError};
pub use oauth::{AuthError, OAuthToken};
pub use yahoo::{
    indexed_values, parse_leagues_from_response, parse_roster_from_response, IndexedObject,
    League, Player, Team,
};

pub const CLIENT_ID_ENV_VAR: &str = "YAHOO_CLIENT_ID";
pub const CLIENT_SECRET_ENV_VAR: &str = "YAHOO_CLIENT_SECRET";
pub const REDIRECT_URI_ENV_VAR: &str = "YAHOO_REDIRECT_URI";
pub const TOKEN_ENV_VAR: &str = "YAHOO_OAUTH_TOKEN";
pub const BIND_ENV_VAR: &str = "YAHOO_FANTASY_BIND";
