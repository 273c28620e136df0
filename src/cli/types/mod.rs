//! Type-safe wrappers for Yahoo Fantasy command arguments.

pub mod ids;

pub use ids::TeamKey;
