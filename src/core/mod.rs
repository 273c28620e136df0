//! Core utilities for the Yahoo Fantasy CLI
//!
//! - `store`: token file persistence

pub mod store;

pub use store::{load_encoded, save_token, token_path, try_read_to_string, write_string};
