//! Yahoo Fantasy Sports API: response decoding and the HTTP client.

pub mod http;
pub mod indexed;
pub mod leagues;
pub mod roster;
pub mod types;

pub use indexed::{indexed_values, IndexedObject};
pub use leagues::parse_leagues_from_response;
pub use roster::parse_roster_from_response;
pub use types::{League, Player, Team};
