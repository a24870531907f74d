//! Elo rating engine
//!
//! This module provides the per-chat rating tables, the Elo update math for 1v1 and
//! 2v2 games, and the store that persists every chat's ratings to disk.

pub mod elo;
pub mod ladder;
pub mod store;
pub mod table;

// Re-export commonly used types
pub use ladder::Ladder;
pub use store::RatingStore;
pub use table::RatingTable;
